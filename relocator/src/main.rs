use relocator::commands::command_argument_builder;
use relocator::handlers::{handle_find, handle_weights, init_tracing};

fn main() {
    let cmd = command_argument_builder();
    let chosen_command = cmd.get_matches();

    init_tracing(chosen_command.get_count("verbose"));

    match chosen_command.subcommand() {
        Some(("find", primary_command)) => handle_find(primary_command),
        Some(("weights", primary_command)) => handle_weights(primary_command),
        _ => unreachable!("clap should ensure we don't get here"),
    }
}
