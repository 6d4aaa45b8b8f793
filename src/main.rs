// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use fintrack::{cli, commands, config, utils};

fn main() -> Result<()> {
    utils::init_tracing();
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let cfg_path = config::config_path()?;
    let mut settings = config::load_from(&cfg_path)?;

    match matches.subcommand() {
        Some(("config", sub)) => commands::settings::handle(&cfg_path, &mut settings, sub)?,
        Some(("dashboard", sub)) => {
            let set = utils::load_snapshot(sub, &settings)?;
            commands::dashboard::handle(&set, &settings, sub)?
        }
        Some(("report", sub)) => {
            let set = utils::load_snapshot(sub, &settings)?;
            commands::reports::handle(&set, &settings, sub)?
        }
        Some(("tx", sub)) => {
            let set = utils::load_snapshot(sub, &settings)?;
            commands::transactions::handle(&set, &settings, sub)?
        }
        Some(("emi", sub)) => {
            let set = utils::load_snapshot(sub, &settings)?;
            commands::emis::handle(&set, &settings, sub)?
        }
        Some(("export", sub)) => {
            let set = utils::load_snapshot(sub, &settings)?;
            commands::exporter::handle(&set, sub)?
        }
        Some(("doctor", sub)) => commands::doctor::handle(&utils::load_snapshot(sub, &settings)?)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
