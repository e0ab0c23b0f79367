// Copyright 2025 Cedric Hammes
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

mod commands;

use crate::commands::{
    CommandLine,
    Commands,
};
use colorful::{
    Color,
    Colorful,
};
use log::{
    debug,
    error,
    LevelFilter,
};
use simple_logger::SimpleLogger;
use std::process::exit;

fn run(command_line: CommandLine) -> anyhow::Result<bool> {
    let flags = command_line.ipv4_formats;
    debug!("Accepting IPv4 notations {:?}", flags);
    match command_line.command {
        Commands::Inspect { target } => commands::inspect(&target, flags).map(|_| true),
        Commands::Contains { network, address } => commands::contains(&network, &address, flags),
        Commands::Classify { addresses } => commands::classify(&addresses, flags).map(|_| true),
    }
}

fn main() {
    let command_line = CommandLine::parse_args();
    let level = if command_line.verbose { LevelFilter::Debug } else { LevelFilter::Info };
    if let Err(error) = SimpleLogger::new().with_level(level).init() {
        println!("Unable to initialize logging => {}", error);
        exit(-1);
    }

    if command_line.verbose {
        let header = r#"    _       __   _ __
   (_)___  / /__(_) /_
  / / __ \/ //_/ / __/
 / / /_/ / ,< / / /_
/_/ .___/_/|_/_/\__/
 /_/  IPv4/IPv6 address toolkit"#;
        println!("{}\n", header.gradient(Color::Green).bold());
    }

    match run(command_line) {
        Ok(true) => {}
        Ok(false) => exit(1),
        Err(error) => {
            error!("Unable to execute command => {:#}", error);
            exit(-1);
        }
    }
}
