use clap::{arg, command};
use std::path::PathBuf;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("relocator")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("relocator")
        .styles(CLAP_STYLING)
        .arg(
            arg!(-q --"quiet" "Only print the path of the found element")
                .required(false)
                .global(true),
        )
        .arg(
            arg!(-v --"verbose" ... "Increase log verbosity (-v info, -vv debug)")
                .required(false)
                .global(true),
        )
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            command!("find")
                .about(
                    "Find the element of the origin document inside the diff document, by \
                attribute and content similarity.",
                )
                .arg(
                    arg!(<ORIGIN>)
                        .help("Path to the origin HTML document")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(<DIFF>)
                        .help("Path to the modified HTML document to search")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(-i --"id" <ID>)
                        .required(false)
                        .help("Identifier of the element in the origin document")
                        .default_value(relocator_core::DEFAULT_TARGET_ID),
                )
                .arg(
                    arg!(-w --"weights" <PATH>)
                        .required(false)
                        .help("JSON file overriding the per-field weights")
                        .value_parser(clap::value_parser!(PathBuf)),
                )
                .arg(
                    arg!(--"tie-break" <POLICY>)
                        .required(false)
                        .help("Which candidate wins when several share the biggest weight")
                        .value_parser(["last", "first"])
                        .default_value("last"),
                )
                .arg(
                    arg!(--"extraction" <MODE>)
                        .required(false)
                        .help("Fingerprint elements from parsed attributes or from their markup")
                        .value_parser(["structured", "markup"])
                        .default_value("structured"),
                )
                .arg(
                    arg!(-f --"format" <FORMAT>)
                        .required(false)
                        .help("Report format: text, json")
                        .value_parser(["text", "json"])
                        .default_value("text"),
                )
                .arg(
                    arg!(-o --"output" <PATH>)
                        .required(false)
                        .help("Save report to file (default: display to screen)")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
        .subcommand(
            command!("weights")
                .about("Print the weight table used for scoring, as JSON")
                .arg(
                    arg!(-w --"weights" <PATH>)
                        .required(false)
                        .help("JSON file overriding the per-field weights")
                        .value_parser(clap::value_parser!(PathBuf)),
                ),
        )
}
