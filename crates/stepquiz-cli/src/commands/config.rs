use clap::Subcommand;
use stepquiz_core::QuizConfig;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the quiz configuration
    Show {
        /// Print as JSON instead of TOML
        #[arg(long)]
        json: bool,
    },
    /// Print the config file path
    Path,
    /// Write the built-in default quiz to the config file
    Init,
}

pub fn run(action: ConfigAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        ConfigAction::Show { json } => {
            let config = QuizConfig::load()?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                print!("{}", toml::to_string_pretty(&config)?);
            }
        }
        ConfigAction::Path => {
            println!("{}", QuizConfig::path()?.display());
        }
        ConfigAction::Init => {
            let config = QuizConfig::default();
            config.save()?;
            println!("default quiz written to {}", QuizConfig::path()?.display());
        }
    }
    Ok(())
}
