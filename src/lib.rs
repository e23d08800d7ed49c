/*!

# retext - grapheme-aware regex matching and `{}`-style templating

This crate wraps a regular expression primitive with a correctness layer for
Unicode text: match results carry ranges measured in extended grapheme
clusters of the original string, so they are always safe to slice and
replace with, and a small templating engine resolves `{}` / `{n}` / `{name}`
placeholders against positional or named arguments with `{{` / `}}` escaping.

# Example: test if a string contains a match

```rust
use retext::Matcher;
let re = Matcher::new(r"\d{4}").unwrap();
assert!(re.is_match("2020-20-05"));
```

# Example: iterating over matches

```rust
use retext::Matcher;
let re = Matcher::new(r"season (\d+), episode (\d+)").unwrap();
let text = "season 8, episode 5; season 5, episode 20";
for m in re.find_all(text).unwrap() {
    println!("{}", m.full_match);
}
// Output: season 8, episode 5
// Output: season 5, episode 20
```

# Example: grapheme-safe ranges

Match ranges are expressed in grapheme clusters, not bytes, so multi-scalar
sequences such as emoji are never split:

```rust
use retext::{Matcher, slice};
let text = "🦧🔥🎭🚅î";
let re = Matcher::new("🎭").unwrap();
let m = re.find(text).unwrap().unwrap();
assert_eq!(m.range(), 2..3);
assert_eq!(slice(text, m.range()), "🎭");
```

# Example: capture groups

A group which did not participate in the match is `None`, distinct from a
group which matched the empty string:

```rust
use retext::Matcher;
let re = Matcher::new("(a)|(b)").unwrap();
let m = re.find("b").unwrap().unwrap();
assert!(m.groups[0].is_none());
assert_eq!(m.groups[1].as_ref().unwrap().text, "b");
```

# Example: templating

```rust
use retext::{format_named, format_positional};
use std::collections::HashMap;

assert_eq!(format_positional("{} and {}", &["x", "y"]).unwrap(), "x and y");
assert_eq!(format_positional("{1}-{0}", &["a", "b"]).unwrap(), "b-a");
assert_eq!(format_positional("{{}}", &[""; 0]).unwrap(), "{}");

let mut vals = HashMap::new();
vals.insert("n", "Peter");
vals.insert("a", "21");
assert_eq!(
    format_named("name: {n}, age: {a}", &vals).unwrap(),
    "name: Peter, age: 21"
);
```

Invalid inputs are reported as error values, never panics: a malformed
pattern is a [`PatternError`], a template that mixes `{}` with `{0}` or
references a missing argument or key is a [`FormatError`].

# Unicode remarks

Ranges align to extended grapheme cluster boundaries as defined by UAX #29.
If the underlying engine reports a match boundary that falls strictly inside
a cluster (for example, matching `"e"` against the decomposed sequence
`"e\u{301}"`), the boundary is refused with a [`TranslationError`] rather
than silently clamped.

No normalization is performed; precomposed and decomposed forms are distinct,
matching the behavior of the underlying engine.

# Concurrency

A compiled [`Matcher`] is immutable, cheap to clone, and `Send + Sync`; it
may be cached and shared freely across threads. All other state is local to
a single call.

The underlying engine uses classical backtracking and does not provide
linear-time guarantees; callers matching adversarial patterns against
adversarial input should bound their inputs accordingly.

*/

#![warn(clippy::all)]

pub use crate::api::{Group, MatchRecord, Matcher, Options, PatternError, Range};
pub use crate::indexing::{grapheme_len, replace_range, slice, IndexTranslator, TranslationError};
pub use crate::template::{format_named, format_positional, FormatError};

mod api;
mod cursor;
mod exec;
mod indexing;
mod template;
