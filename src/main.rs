// Copyright 2025 dentsusoken
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wwdl::commands::generate::{GenerateCommand, GenerateOptions};
use wwdl::commands::verify::VerifyCommand;
use wwdl::commands::versions::VersionsCommand;
use wwdl::config::new_wwdl_config;
use wwdl::error::{Result, format_error_chain, get_exit_code};
use wwdl::logging;

#[derive(Parser)]
#[command(name = "wwdl")]
#[command(author, version, about = "Download list generator for Wuthering Waves builds", long_about = None)]
struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Read configuration from this file instead of the default location
    #[arg(long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the current build version of every configured server
    #[command(visible_alias = "ls")]
    Versions {
        /// Output in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Write the URL list, MD5 list and details file for one build
    #[command(visible_alias = "g")]
    Generate {
        /// Server label to use (e.g., "Live - OS")
        #[arg(long, conflicts_with = "manifest_url")]
        server: Option<String>,

        /// Use this manifest directly and skip version discovery
        #[arg(long, value_name = "URL")]
        manifest_url: Option<String>,

        /// Directory for the generated files
        #[arg(short, long, value_name = "DIR")]
        output_dir: Option<PathBuf>,

        /// Disable progress indicators
        #[arg(long)]
        no_progress: bool,
    },

    /// Check downloaded files against a generated MD5 list
    Verify {
        /// Hash file produced by 'generate'
        hashes_file: PathBuf,

        /// Directory the listed files are relative to (defaults to the hash file's directory)
        #[arg(long, value_name = "DIR")]
        root: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    logging::setup_logger(cli.verbose);

    let config = match new_wwdl_config(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", format_error_chain(&e));
            std::process::exit(get_exit_code(&e));
        }
    };

    let result: Result<()> = (|| match cli.command {
        Commands::Versions { json } => {
            let command = VersionsCommand::new(&config)?;
            command.execute(json)
        }
        Commands::Generate {
            server,
            manifest_url,
            output_dir,
            no_progress,
        } => {
            let command = GenerateCommand::new(&config)?;
            command.execute(&GenerateOptions {
                server,
                manifest_url,
                output_dir,
                no_progress,
            })
        }
        Commands::Verify { hashes_file, root } => {
            let command = VerifyCommand::new()?;
            command.execute(&hashes_file, root.as_deref())
        }
    })();

    if let Err(e) = result {
        eprintln!("{}", format_error_chain(&e));
        std::process::exit(get_exit_code(&e));
    }
}
