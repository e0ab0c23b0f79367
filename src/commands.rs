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

use anyhow::Context;
use clap::{
    Parser,
    Subcommand,
};
use colorful::{
    Color,
    Colorful,
};
use ipkit::{
    Address,
    Network,
    ParseFlags,
};
use log::debug;
use std::fmt::Display;

#[derive(Parser)]
#[command(name = "ipkit")]
#[command(about = "Parse, classify and compare IPv4/IPv6 addresses and CIDR networks.")]
pub struct CommandLine {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Comma separated list of accepted IPv4 notations (decimal, octal, hex, variable, long)
    #[arg(long, global = true, default_value = "decimal,octal,hex,variable,long")]
    pub ipv4_formats: ParseFlags,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show every representation of an address or network
    #[command(alias = "i")]
    Inspect { target: String },
    /// Check whether a network contains an address, exits with 1 if it doesn't
    #[command(alias = "c")]
    Contains { network: String, address: String },
    /// Print the special-purpose range of one or more addresses
    #[command(alias = "r")]
    Classify {
        #[arg(required = true)]
        addresses: Vec<String>,
    },
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

fn field<V: Display>(name: &str, value: V) {
    println!("{} {}", format!("{:<14}", name).as_str().color(Color::Green), value);
}

fn print_address(address: &Address) {
    field("family", address.family());
    field("address", address);
    field("normalized", address.to_normalized_string());
    if let Address::V6(address) = address {
        field("fixed", address.to_fixed_length_string());
        if let Some(zone) = address.zone() {
            field("zone", zone);
        }
        if let Ok(embedded) = address.to_ipv4_address() {
            field("ipv4", embedded);
        }
    }
    field("range", address.range());
}

pub fn inspect(target: &str, flags: ParseFlags) -> anyhow::Result<()> {
    if !target.contains('/') {
        let address = ipkit::parse_address_with(target, flags).with_context(|| format!("Unable to parse address '{}'", target))?;
        print_address(&address);
        return Ok(());
    }

    let network = ipkit::parse_cidr_with(target, flags).with_context(|| format!("Unable to parse network '{}'", target))?;
    debug!("Inspecting network {} with {} host bits", network, network.host_bits());
    print_address(network.address());
    field("prefix", network.prefix());
    field("mask", network.mask());
    field("host mask", network.host_mask());
    field("network", network.network_address());
    field("broadcast", network.broadcast_address());
    field("first host", network.first_host());
    field("last host", network.last_host());
    match network.number_of_addresses() {
        Some(count) => field("addresses", count),
        None => field("addresses", "2^128"),
    }
    Ok(())
}

pub fn contains(network: &str, address: &str, flags: ParseFlags) -> anyhow::Result<bool> {
    let network: Network =
        ipkit::parse_cidr_with(network, flags).with_context(|| format!("Unable to parse network '{}'", network))?;
    let address = ipkit::parse_address_with(address, flags).with_context(|| format!("Unable to parse address '{}'", address))?;

    let contained = address.contained_by(&network);
    match contained {
        true => println!("{} {} {}", address, "is in".color(Color::Green), network),
        false => println!("{} {} {}", address, "is not in".color(Color::Red), network),
    }
    Ok(contained)
}

pub fn classify(addresses: &[String], flags: ParseFlags) -> anyhow::Result<()> {
    for text in addresses {
        let address = ipkit::parse_address_with(text, flags).with_context(|| format!("Unable to parse address '{}'", text))?;
        println!("{} {}", address, address.range().color(Color::Yellow));
    }
    Ok(())
}
