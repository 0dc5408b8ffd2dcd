use clap::{Parser, Subcommand};
use notas::Broker;

pub mod formatters;

#[derive(Parser)]
#[command(name = "notas")]
#[command(
    version,
    about = "Brazilian brokerage note parser with per-trade fees and IRRF"
)]
#[command(
    long_about = "Read brokerage notes (notas de corretagem) from Rico or NuInvest and print every trade with its share of the note's fees and withheld income tax."
)]
pub struct Cli {
    /// Disable colorized/ANSI output
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a brokerage note and print its trades
    Parse {
        /// Broker that issued the note
        #[arg(value_enum)]
        broker: Broker,

        /// Path to the note PDF
        file: String,

        /// PDF password (often the first digits of the holder's CPF)
        password: Option<String>,

        /// PDF password, as a flag
        #[arg(long = "password", value_name = "PASSWORD", conflicts_with = "password")]
        password_flag: Option<String>,

        /// FILE holds text already extracted from the PDF
        #[arg(long)]
        from_text: bool,

        /// Print a table instead of JSON
        #[arg(short, long)]
        table: bool,

        /// Symbol lookup timeout in seconds
        #[arg(long)]
        timeout: Option<u64>,
    },

    /// List supported brokers
    Brokers,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_args_with_password() {
        let cli = Cli::try_parse_from(["notas", "parse", "rico", "nota.pdf", "123"]).unwrap();
        match cli.command {
            Commands::Parse {
                broker,
                file,
                password,
                password_flag,
                from_text,
                table,
                timeout,
            } => {
                assert_eq!(broker, Broker::Rico);
                assert_eq!(password_flag, None);
                assert_eq!(file, "nota.pdf");
                assert_eq!(password.as_deref(), Some("123"));
                assert!(!from_text && !table);
                assert_eq!(timeout, None);
            }
            Commands::Brokers => panic!("expected parse command"),
        }
    }

    #[test]
    fn password_flag_conflicts_with_positional() {
        let cli =
            Cli::try_parse_from(["notas", "parse", "nuinvest", "nota.pdf", "--password", "9"])
                .unwrap();
        match cli.command {
            Commands::Parse { password_flag, .. } => assert_eq!(password_flag.as_deref(), Some("9")),
            Commands::Brokers => panic!("expected parse command"),
        }
        assert!(Cli::try_parse_from([
            "notas",
            "parse",
            "rico",
            "nota.pdf",
            "1",
            "--password",
            "2"
        ])
        .is_err());
    }

    #[test]
    fn rejects_unknown_broker() {
        assert!(Cli::try_parse_from(["notas", "parse", "xp", "nota.pdf"]).is_err());
    }
}
