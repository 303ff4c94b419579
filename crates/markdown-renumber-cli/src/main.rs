use anyhow::{Context, Result, bail};
use markdown_renumber_config::{Config, IndentSetting};
use markdown_renumber_engine::{Document, IndentStyle, Renumberer, io};
use relative_path::RelativePathBuf;
use std::path::{Path, PathBuf};
use std::{env, process};

const USAGE: &str = "[--check] [--line N | --range START:END] [PATH...]";

/// Which lists of a file get renumbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// Every list in the file.
    Document,
    /// The list containing this 0-based line, fixed locally from there.
    Line(usize),
    /// Every list intersecting this inclusive 0-based line range.
    Range(usize, usize),
}

#[derive(Debug, PartialEq, Eq)]
struct Options {
    check: bool,
    target: Target,
    paths: Vec<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut check = false;
    let mut target = Target::Document;
    let mut paths = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--check" => check = true,
            "--line" => {
                let value = iter.next().context("--line needs a line number")?;
                let line = value
                    .parse()
                    .with_context(|| format!("invalid line number '{value}'"))?;
                target = Target::Line(line);
            }
            "--range" => {
                let value = iter.next().context("--range needs START:END")?;
                target = parse_range(value)?;
            }
            flag if flag.starts_with("--") => bail!("unknown option '{flag}'"),
            path => paths.push(PathBuf::from(path)),
        }
    }

    Ok(Options {
        check,
        target,
        paths,
    })
}

fn parse_range(value: &str) -> Result<Target> {
    let (start, end) = value
        .split_once(':')
        .with_context(|| format!("range '{value}' is not START:END"))?;
    let start: usize = start
        .parse()
        .with_context(|| format!("invalid range start '{start}'"))?;
    let end: usize = end
        .parse()
        .with_context(|| format!("invalid range end '{end}'"))?;
    if end < start {
        bail!("range end {end} is before start {start}");
    }
    Ok(Target::Range(start, end))
}

fn indent_style(setting: IndentSetting, doc: &Document) -> IndentStyle {
    match setting {
        IndentSetting::Tabs => IndentStyle::Tabs,
        IndentSetting::Spaces(n) => IndentStyle::Spaces(n),
        IndentSetting::Auto => doc.detect_indent_style(),
    }
}

/// Renumbers `content`, returning the new text only if something changed.
fn renumber_content(
    content: &str,
    target: Target,
    setting: IndentSetting,
) -> Result<Option<String>> {
    let mut doc = Document::from_bytes(content.as_bytes())?;
    let renumberer = Renumberer::with_indent_style(indent_style(setting, &doc));

    let changed = match target {
        Target::Document => renumberer.renumber_document(&mut doc)?,
        Target::Line(line) => renumberer.renumber_list_at_cursor(&mut doc, line)?,
        Target::Range(start, end) => renumberer.renumber_all_lists_in_range(&mut doc, start, end)?,
    };

    Ok(changed.then(|| doc.text()))
}

/// Expands the command-line paths into `(root, relative path)` pairs.
///
/// Directories contribute every markdown file selected by the config's
/// include patterns; files are taken as given.
fn collect_files(paths: &[PathBuf], config: &Config) -> Result<Vec<(PathBuf, RelativePathBuf)>> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_dir() {
            for relative in io::scan_markdown_files(path)? {
                if config.matches(relative.as_str())? {
                    files.push((path.clone(), relative));
                } else {
                    log::debug!("skipping {relative}: not matched by include patterns");
                }
            }
        } else {
            files.push(io::split_file_path(path)?);
        }
    }

    Ok(files)
}

/// A file whose renumbered content is ready to be written.
struct Rewrite {
    root: PathBuf,
    relative: RelativePathBuf,
    path: PathBuf,
    content: String,
}

/// Processes every file, returning those that changed (or would change under
/// `--check`).
///
/// Every file is read and renumbered before the first write, so an error in
/// any file leaves all of them untouched.
fn run(options: &Options, config: &Config) -> Result<Vec<PathBuf>> {
    let mut rewrites = Vec::new();

    for (root, relative) in collect_files(&options.paths, config)? {
        let path = relative.to_path(&root);
        let content = io::read_file(&relative, &root)
            .with_context(|| format!("reading {}", path.display()))?;

        match renumber_content(&content, options.target, config.indent)
            .with_context(|| format!("renumbering {}", path.display()))?
        {
            Some(content) => rewrites.push(Rewrite {
                root,
                relative,
                path,
                content,
            }),
            None => log::debug!("{} already numbered", path.display()),
        }
    }

    if !options.check {
        for rewrite in &rewrites {
            io::write_file(&rewrite.relative, &rewrite.root, &rewrite.content)
                .with_context(|| format!("writing {}", rewrite.path.display()))?;
            log::info!("renumbered {}", rewrite.path.display());
        }
    }

    Ok(rewrites.into_iter().map(|rewrite| rewrite.path).collect())
}

fn load_config(config_path: &Path) -> Config {
    match Config::load_from_path(config_path) {
        Ok(Some(config)) => config,
        Ok(None) => Config::default(),
        Err(e) => {
            eprintln!("Error: Failed to load config file: {e}");
            process::exit(1);
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("markdown-renumber-cli");
    let config_path = Config::config_path();

    let mut options = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(options) => options,
        Err(e) => {
            eprintln!("Error: {e:#}");
            eprintln!("Usage: {program} {USAGE}");
            process::exit(1);
        }
    };

    let config = load_config(&config_path);

    if options.paths.is_empty() {
        match &config.notes_path {
            Some(notes_path) => options.paths.push(notes_path.clone()),
            None => {
                eprintln!("Error: No path provided and no notes_path in config");
                eprintln!("Usage: {program} {USAGE}");
                eprintln!("Or set notes_path in {}", config_path.display());
                process::exit(1);
            }
        }
    }

    let changed = run(&options, &config)?;

    if options.check {
        for path in &changed {
            println!("{}", path.display());
        }
        if !changed.is_empty() {
            eprintln!("{} file(s) need renumbering", changed.len());
            process::exit(1);
        }
    } else {
        for path in &changed {
            println!("renumbered {}", path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args_defaults() {
        let options = parse_args(&args(&["notes"])).unwrap();

        assert_eq!(
            options,
            Options {
                check: false,
                target: Target::Document,
                paths: vec![PathBuf::from("notes")],
            }
        );
    }

    #[test]
    fn test_parse_args_line_and_check() {
        let options = parse_args(&args(&["--check", "--line", "3", "a.md"])).unwrap();

        assert!(options.check);
        assert_eq!(options.target, Target::Line(3));
    }

    #[test]
    fn test_parse_args_range() {
        let options = parse_args(&args(&["--range", "2:10", "a.md"])).unwrap();

        assert_eq!(options.target, Target::Range(2, 10));
    }

    #[test]
    fn test_parse_args_rejects_bad_input() {
        assert!(parse_args(&args(&["--range", "10:2"])).is_err());
        assert!(parse_args(&args(&["--range", "x"])).is_err());
        assert!(parse_args(&args(&["--line"])).is_err());
        assert!(parse_args(&args(&["--verbose"])).is_err());
    }

    #[test]
    fn test_renumber_content_unchanged_is_none() {
        let result = renumber_content("1. a\n2. b\n", Target::Document, IndentSetting::Tabs).unwrap();

        assert_eq!(result, None);
    }

    #[test]
    fn test_renumber_content_line_target_is_local() {
        let result = renumber_content(
            "1. a\n3. b\n3. c\n5. d",
            Target::Line(0),
            IndentSetting::Tabs,
        )
        .unwrap();

        assert_eq!(result.as_deref(), Some("1. a\n2. b\n3. c\n5. d"));
    }

    #[test]
    fn test_renumber_content_auto_indent() {
        let result = renumber_content(
            "1. a\n1. b\n  1. x\n  1. y\n1. c",
            Target::Document,
            IndentSetting::Auto,
        )
        .unwrap();

        assert_eq!(result.as_deref(), Some("1. a\n2. b\n  1. x\n  2. y\n3. c"));
    }

    #[test]
    fn test_run_rewrites_only_changed_files() {
        let notes = TempDir::new().unwrap();
        std::fs::write(notes.path().join("broken.md"), "1. a\n1. b\n").unwrap();
        std::fs::write(notes.path().join("fine.md"), "1. a\n2. b\n").unwrap();
        let options = Options {
            check: false,
            target: Target::Document,
            paths: vec![notes.path().to_path_buf()],
        };

        let changed = run(&options, &Config::default()).unwrap();

        assert_eq!(changed, vec![notes.path().join("broken.md")]);
        assert_eq!(
            std::fs::read_to_string(notes.path().join("broken.md")).unwrap(),
            "1. a\n2. b\n"
        );
    }

    #[test]
    fn test_run_check_mode_writes_nothing() {
        let notes = TempDir::new().unwrap();
        let file = notes.path().join("broken.md");
        std::fs::write(&file, "1. a\n1. b\n").unwrap();
        let options = Options {
            check: true,
            target: Target::Document,
            paths: vec![file.clone()],
        };

        let changed = run(&options, &Config::default()).unwrap();

        assert_eq!(changed, vec![file.clone()]);
        assert_eq!(std::fs::read_to_string(&file).unwrap(), "1. a\n1. b\n");
    }

    #[test]
    fn test_run_default_config_keeps_space_indented_lists() {
        // Given a correctly numbered list with a two-space nested list
        let notes = TempDir::new().unwrap();
        let file = notes.path().join("nested.md");
        let content = "1. a\n2. b\n  1. x\n  2. y\n3. c\n";
        std::fs::write(&file, content).unwrap();
        let options = Options {
            check: false,
            target: Target::Document,
            paths: vec![file.clone()],
        };

        // When run with the default config
        let changed = run(&options, &Config::default()).unwrap();

        // Then the outer list is left alone
        assert!(changed.is_empty());
        assert_eq!(std::fs::read_to_string(&file).unwrap(), content);
    }

    #[test]
    fn test_run_failure_writes_no_file() {
        let notes = TempDir::new().unwrap();
        let long = notes.path().join("a_long.md");
        std::fs::write(&long, "1. a\n1. b\n1. c\n1. d\n1. e\n1. f\n").unwrap();
        std::fs::write(notes.path().join("b_short.md"), "1. a\n1. b\n").unwrap();
        let options = Options {
            check: false,
            target: Target::Line(5),
            paths: vec![notes.path().to_path_buf()],
        };

        let result = run(&options, &Config::default());

        assert!(result.is_err());
        assert_eq!(
            std::fs::read_to_string(&long).unwrap(),
            "1. a\n1. b\n1. c\n1. d\n1. e\n1. f\n"
        );
    }

    #[test]
    fn test_collect_files_applies_include_patterns() {
        let notes = TempDir::new().unwrap();
        std::fs::create_dir(notes.path().join("journal")).unwrap();
        std::fs::write(notes.path().join("journal").join("mon.md"), "1. a").unwrap();
        std::fs::write(notes.path().join("todo.md"), "1. a").unwrap();
        let config = Config {
            include: vec!["journal/*.md".to_string()],
            ..Config::default()
        };

        let files = collect_files(&[notes.path().to_path_buf()], &config).unwrap();

        assert_eq!(
            files,
            vec![(
                notes.path().to_path_buf(),
                RelativePathBuf::from("journal/mon.md")
            )]
        );
    }
}
