// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use {
    anyhow::{anyhow, Context, Result},
    clap::{value_parser, Arg, ArgAction, ArgMatches, Command},
    log::LevelFilter,
    romfs_file_manifest::DEFAULT_IGNORE_FILE_NAME,
    romfs_generator::{Generator, GeneratorConfig},
    std::path::PathBuf,
};

const ABOUT: &str = "\
Package a directory tree into a Rust module embedding it as a resource table.

Every regular file below RESOURCE_DIR becomes a resource addressed by its
path relative to RESOURCE_DIR, using `/` separators. The generated module is
meant to be `include!`d by a crate depending on `romfs`.

# Filtering

Patterns are matched against relative paths. `*` matches any run of
characters and `**` matches across directories. A leading `**/` also
matches files at the top level.

If --include is given, only paths matching one of the include patterns are
packaged. Paths matching an --exclude pattern are never packaged.

Unless --no-ignore-file is given, exclude patterns are also read from an
ignore file in RESOURCE_DIR, one per line. Blank lines and lines starting
with `#` are skipped.

# Compression

With --compress, payloads are deflate compressed. The crate including the
generated module must then enable the `compress-resources` feature of
`romfs`, otherwise it fails to compile.
";

pub fn command() -> Command {
    Command::new("romfs-generator")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Package a directory tree into an embeddable resource table")
        .long_about(ABOUT)
        .arg(
            Arg::new("project_name")
                .required(true)
                .help("Name of the resource table"),
        )
        .arg(
            Arg::new("resource_dir")
                .required(true)
                .value_parser(value_parser!(PathBuf))
                .help("Directory containing resources"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_parser(value_parser!(PathBuf))
                .default_value(romfs_generator::DEFAULT_OUTPUT_FILE_NAME)
                .help("Path of the Rust module to write"),
        )
        .arg(
            Arg::new("compress")
                .long("compress")
                .action(ArgAction::SetTrue)
                .help("Deflate compress resource payloads"),
        )
        .arg(
            Arg::new("include")
                .long("include")
                .action(ArgAction::Append)
                .value_name("PATTERN")
                .help("Only package paths matching this pattern"),
        )
        .arg(
            Arg::new("exclude")
                .long("exclude")
                .action(ArgAction::Append)
                .value_name("PATTERN")
                .help("Never package paths matching this pattern"),
        )
        .arg(
            Arg::new("ignore_file_name")
                .long("ignore-file-name")
                .default_value(DEFAULT_IGNORE_FILE_NAME)
                .help("Name of the ignore file in the resource directory"),
        )
        .arg(
            Arg::new("no_ignore_file")
                .long("no-ignore-file")
                .action(ArgAction::SetTrue)
                .help("Do not read exclude patterns from the ignore file"),
        )
        .arg(
            Arg::new("strict")
                .long("strict")
                .action(ArgAction::SetTrue)
                .help("Fail if any resource cannot be packaged"),
        )
        .arg(
            Arg::new("list")
                .long("list")
                .action(ArgAction::SetTrue)
                .help("Print the paths that would be packaged and exit"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::Count)
                .help("Increase logging verbosity. Can be specified multiple times."),
        )
}

fn strings(args: &ArgMatches, id: &str) -> Vec<String> {
    args.get_many::<String>(id)
        .map(|values| values.cloned().collect())
        .unwrap_or_default()
}

pub fn config_from_matches(args: &ArgMatches) -> Result<GeneratorConfig> {
    let name = args
        .get_one::<String>("project_name")
        .ok_or_else(|| anyhow!("project name argument is required"))?;
    let root = args
        .get_one::<PathBuf>("resource_dir")
        .ok_or_else(|| anyhow!("resource directory argument is required"))?;

    let mut config = GeneratorConfig::new(name.as_str(), root)
        .compress(args.get_flag("compress"))
        .use_ignore_file(!args.get_flag("no_ignore_file"))
        .strict(args.get_flag("strict"));

    if let Some(ignore_file_name) = args.get_one::<String>("ignore_file_name") {
        config = config.ignore_file_name(ignore_file_name.as_str());
    }

    config.include_patterns = strings(args, "include");
    config.exclude_patterns = strings(args, "exclude");

    Ok(config)
}

fn init_logging(args: &ArgMatches) {
    let log_level = match args.get_count("verbose") {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level.as_str()),
    );

    // Disable log context except at higher log levels.
    if log_level <= LevelFilter::Info {
        builder
            .format_timestamp(None)
            .format_level(false)
            .format_target(false);
    }

    builder.init();
}

pub fn run() -> Result<()> {
    let matches = command().get_matches();

    init_logging(&matches);

    let config = config_from_matches(&matches)?;
    let generator = Generator::new(config)?;

    if matches.get_flag("list") {
        for file in generator.discover()?.files {
            println!("{}", file.path);
        }

        return Ok(());
    }

    let output = matches
        .get_one::<PathBuf>("output")
        .ok_or_else(|| anyhow!("output argument has a default"))?;

    let table = generator
        .write_to(output)
        .with_context(|| format!("generating {}", output.display()))?;

    println!(
        "wrote {} resources to {}",
        table.entries.len(),
        output.display()
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ArgMatches> {
        Ok(command().try_get_matches_from(args)?)
    }

    #[test]
    fn test_command_is_valid() {
        command().debug_assert();
    }

    #[test]
    fn test_defaults() -> Result<()> {
        let matches = parse(&["romfs-generator", "project", "res"])?;
        let config = config_from_matches(&matches)?;

        assert_eq!(config, GeneratorConfig::new("project", "res"));
        assert_eq!(
            matches.get_one::<PathBuf>("output"),
            Some(&PathBuf::from("romfs_resources.rs"))
        );
        assert!(!matches.get_flag("list"));

        Ok(())
    }

    #[test]
    fn test_all_options() -> Result<()> {
        let matches = parse(&[
            "romfs-generator",
            "project",
            "res",
            "-o",
            "out/gen.rs",
            "--compress",
            "--include",
            "*.json",
            "--include",
            "**/*.txt",
            "--exclude",
            "*.tmp",
            "--ignore-file-name",
            ".resignore",
            "--no-ignore-file",
            "--strict",
            "-vv",
        ])?;
        let config = config_from_matches(&matches)?;

        assert!(config.compress);
        assert!(config.strict);
        assert!(!config.use_ignore_file);
        assert_eq!(config.include_patterns, vec!["*.json", "**/*.txt"]);
        assert_eq!(config.exclude_patterns, vec!["*.tmp"]);
        assert_eq!(config.ignore_file_name, ".resignore");
        assert_eq!(
            matches.get_one::<PathBuf>("output"),
            Some(&PathBuf::from("out/gen.rs"))
        );
        assert_eq!(matches.get_count("verbose"), 2);

        Ok(())
    }

    #[test]
    fn test_missing_arguments() {
        assert!(parse(&["romfs-generator"]).is_err());
        assert!(parse(&["romfs-generator", "project"]).is_err());
    }
}
