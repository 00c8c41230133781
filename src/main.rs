use std::env;
use std::fs;
use std::process;

use chime::{Player, SquareWave, StdClock};

fn main() {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: chime <song.txt>");
        eprintln!("       chime --check <song.txt>");
        process::exit(1);
    }

    let mut check_only = false;
    let mut input_path = &args[1];

    if args[1] == "--check" {
        check_only = true;
        if args.len() < 3 {
            eprintln!("Usage: chime --check <song.txt>");
            process::exit(1);
        }
        input_path = &args[2];
    }

    let source = match fs::read_to_string(input_path) {
        Ok(content) => content,
        Err(e) => {
            eprintln!("Error reading file '{}': {}", input_path, e);
            process::exit(1);
        }
    };

    if check_only {
        let events = match chime::check_source(&source) {
            Ok(events) => events,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        };
        match serde_yaml::to_string(&events) {
            Ok(yaml) => print!("{}", yaml),
            Err(e) => {
                eprintln!("Error serializing events: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    let device = match SquareWave::open() {
        Ok(device) => device,
        Err(e) => {
            eprintln!("Error opening tone device: {}", e);
            process::exit(1);
        }
    };

    let mut player = Player::new(device, StdClock);
    if let Err(e) = chime::play_source(&source, &mut player) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
