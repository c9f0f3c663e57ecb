use clap::Subcommand;
use nt_core::{PurposeResolver, Result};

use crate::manager::TrendManager;

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum TrendCommands {
    /// Summarize recent news for a keyword and print the digest as JSON
    Trend {
        keyword: String,
    },
    /// Print the summarization purpose a keyword maps to
    Purpose {
        keyword: String,
    },
}

/// Runs one pipeline subcommand. `build` is only called by commands that need the
/// full pipeline, so `purpose` works without a configured model.
pub async fn handle_command<F>(command: TrendCommands, resolver: PurposeResolver, build: F) -> Result<()>
where
    F: FnOnce(PurposeResolver) -> Result<TrendManager>,
{
    match command {
        TrendCommands::Trend { keyword } => {
            let manager = build(resolver)?;
            let digest = manager.run(&keyword).await?;
            println!("{}", serde_json::to_string_pretty(&digest)?);
        }
        TrendCommands::Purpose { keyword } => {
            println!("{}", resolver.resolve(&keyword));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nt_core::Error;

    fn no_model(_: PurposeResolver) -> Result<TrendManager> {
        Err(Error::Inference("OpenAI API key is required".to_string()))
    }

    #[tokio::test]
    async fn test_purpose_does_not_build_pipeline() {
        let command = TrendCommands::Purpose {
            keyword: "비트코인".to_string(),
        };
        assert!(handle_command(command, PurposeResolver::default(), no_model).await.is_ok());
    }

    #[tokio::test]
    async fn test_trend_reports_build_failure() {
        let command = TrendCommands::Trend {
            keyword: "비트코인".to_string(),
        };
        let err = handle_command(command, PurposeResolver::default(), no_model)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Inference(_)));
    }
}
