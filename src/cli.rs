use std::path::PathBuf;

use clap::Parser;

/// Command line surface of the installer.
#[derive(Parser, Debug)]
#[command(
    name = "ktcc-install",
    version,
    about = "Link the Klipper Tool Changer Code extension into a Klipper install"
)]
pub struct Cli {
    /// Klipper installation root (default: ~/klipper)
    #[arg(short = 'k', long = "klipper", value_name = "PATH")]
    pub klipper_root: Option<PathBuf>,

    /// Restart klipper.service once the extension files are linked
    #[arg(short = 'r', long = "restart")]
    pub restart: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use std::path::Path;

    #[test]
    fn parses_klipper_override() {
        let cli = Cli::try_parse_from(["ktcc-install", "-k", "/opt/klipper"]).unwrap();
        assert_eq!(cli.klipper_root.as_deref(), Some(Path::new("/opt/klipper")));
        assert!(!cli.restart);
    }

    #[test]
    fn defaults_when_no_flags_given() {
        let cli = Cli::try_parse_from(["ktcc-install"]).unwrap();
        assert!(cli.klipper_root.is_none());
        assert!(!cli.restart);
    }

    #[test]
    fn long_flags_are_accepted() {
        let cli = Cli::try_parse_from([
            "ktcc-install",
            "--klipper",
            "/home/pi/klipper",
            "--restart",
        ])
        .unwrap();
        assert_eq!(
            cli.klipper_root.as_deref(),
            Some(Path::new("/home/pi/klipper"))
        );
        assert!(cli.restart);
    }

    #[test]
    fn help_is_reported_as_display_help() {
        let err = Cli::try_parse_from(["ktcc-install", "-h"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DisplayHelp);
    }

    #[test]
    fn unknown_flag_is_a_usage_error() {
        let err = Cli::try_parse_from(["ktcc-install", "--bogus"]).unwrap_err();
        assert_ne!(err.kind(), ErrorKind::DisplayHelp);
        assert_ne!(err.kind(), ErrorKind::DisplayVersion);
    }
}
