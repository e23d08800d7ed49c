#![allow(clippy::uninlined_format_args)]

use retext::{format_positional, MatchRecord, Matcher, Options};
use std::{fs, path::PathBuf, process};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(name = "retext-tool")]
struct Opt {
    /// The regular expression pattern, or the template when --format is set.
    pattern: String,

    /// Matcher options: 'i' ignores case, 'm' is multiline, 's' lets '.'
    /// match line separators, 'A' anchors matches to the start of the input.
    #[structopt(long, short, parse(from_str = Options::from))]
    options: Option<Options>,

    /// Print every match rather than only the first.
    #[structopt(long, short, takes_value = false)]
    all: bool,

    /// Replace every match with this string and print the rewritten input.
    #[structopt(long, conflicts_with = "format")]
    replace: Option<String>,

    /// Treat the pattern as a template and the inputs as its positional
    /// arguments.
    #[structopt(long, takes_value = false)]
    format: bool,

    /// The input values to match against.
    #[structopt(conflicts_with_all = &["file"])]
    inputs: Vec<String>,

    /// Match against the contents of a specified file.
    #[structopt(long, conflicts_with_all = &["inputs"])]
    file: Option<PathBuf>,
}

fn format_match(m: &MatchRecord) -> String {
    let mut result = String::new();

    // Show the full matched range, in grapheme units.
    result.push_str(&format!(
        "\"{}\" ({}..{})",
        m.full_match, m.range.start, m.range.end
    ));

    // Show capture groups if any exist.
    if !m.groups.is_empty() {
        result.push_str(", captures: [");
        for (i, group) in m.groups.iter().enumerate() {
            if i > 0 {
                result.push_str(", ");
            }
            if let Some(group) = group {
                result.push_str(&format!(
                    "\"{}\" ({}..{})",
                    group.text, group.range.start, group.range.end
                ));
            } else {
                result.push_str("None");
            }
        }
        result.push(']');
    }

    result
}

fn exec_re_on_string(re: &Matcher, input: &str, all: bool) {
    let result = if all {
        re.find_all(input)
    } else {
        re.find(input).map(|m| m.into_iter().collect())
    };
    match result {
        Ok(matches) => {
            if matches.is_empty() {
                println!("No match");
            } else {
                for m in &matches {
                    println!("Match: {}", format_match(m));
                }
            }
        }
        Err(err) => {
            eprintln!("Match error: {}", err);
        }
    }
}

fn main() {
    let opt = Opt::from_args();

    if opt.format {
        match format_positional(&opt.pattern, &opt.inputs) {
            Ok(text) => println!("{}", text),
            Err(err) => {
                eprintln!("Format error: {}", err);
                process::exit(1);
            }
        }
        return;
    }

    let re = match Matcher::with_options(&opt.pattern, opt.options.unwrap_or_default()) {
        Ok(re) => re,
        Err(err) => {
            eprintln!("Pattern failed to compile: {}", err);
            process::exit(1);
        }
    };

    let inputs: Vec<String> = if let Some(path) = &opt.file {
        match fs::read_to_string(path) {
            Ok(contents) => vec![contents],
            Err(err) => {
                eprintln!("{}: {}", err, path.display());
                process::exit(1);
            }
        }
    } else {
        opt.inputs.clone()
    };

    for input in &inputs {
        if let Some(replacement) = &opt.replace {
            match re.replace_all(input, replacement) {
                Ok(text) => println!("{}", text),
                Err(err) => eprintln!("Match error: {}", err),
            }
        } else {
            exec_re_on_string(&re, input, opt.all);
        }
    }
}
