use std::env;
use std::process::ExitCode;

use appconfig::commands::{demo_manager, parse_load_args, run_configure, show_config, show_path};
use appconfig::logger::init_logger;
use appconfig::Result;

fn print_usage() {
    println!("Usage:");
    println!("  appconfig load [--file PATH]   # print the saved configuration");
    println!("  appconfig configure            # prompt for every value and save");
    println!("  appconfig path                 # show where the file lives");
    println!("Options:");
    println!("  -v, --verbose                  # debug logs on stderr (or APPCONFIG_LOG_MODE=verbose)");
}

fn run(args: &[String]) -> Result<i32> {
    let manager = demo_manager()?;

    match args.first().map(String::as_str) {
        Some("load") => match parse_load_args(&args[1..]) {
            Some(file) => {
                show_config(&manager, file)?;
                Ok(0)
            }
            None => {
                print_usage();
                Ok(2)
            }
        },
        Some("configure") => run_configure(&manager),
        Some("path") => {
            show_path(&manager);
            Ok(0)
        }
        Some("help") => {
            print_usage();
            Ok(0)
        }
        _ => {
            print_usage();
            Ok(2)
        }
    }
}

fn main() -> ExitCode {
    let mut args: Vec<String> = env::args().skip(1).collect();
    let verbose = args.iter().any(|a| a == "-v" || a == "--verbose");
    args.retain(|a| a != "-v" && a != "--verbose");
    init_logger(verbose);

    match run(&args) {
        Ok(code) => ExitCode::from(u8::try_from(code).unwrap_or(1)),
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
