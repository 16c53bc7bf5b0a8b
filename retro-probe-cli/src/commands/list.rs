use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use retro_probe_lib::ProbeContext;

/// Print the registered decoders in the order they are tried.
pub(crate) fn run_list(ctx: &ProbeContext) {
    println!("Supported platforms (tried in this order):");

    let mut current_manufacturer = None;

    for entry in ctx.decoders() {
        let manufacturer = entry.metadata.platform.manufacturer();
        if current_manufacturer != Some(manufacturer) {
            println!();
            if !manufacturer.is_empty() {
                println!("{}:", manufacturer.if_supports_color(Stdout, |t| t.bold()));
            }
            current_manufacturer = Some(manufacturer);
        }

        println!(
            "  {} [{}]",
            entry
                .metadata
                .short_name
                .if_supports_color(Stdout, |t| t.bold()),
            entry
                .metadata
                .platform_name
                .if_supports_color(Stdout, |t| t.cyan()),
        );
        println!("    Extensions: {}", entry.metadata.extensions.join(", "));
    }
}
