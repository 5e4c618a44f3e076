use owo_colors::OwoColorize;

const BANNER: &str = r"
     _            _   _
 ___| | ___ _   _| |_| |__
/ __| |/ _ \ | | | __| '_ \
\__ \ |  __/ |_| | |_| | | |
|___/_|\___|\__,_|\__|_| |_|
";

pub fn print_banner() {
    println!("{}", BANNER.cyan());
    println!(
        "{} {}",
        "sleuth".bold(),
        env!("CARGO_PKG_VERSION").dimmed()
    );
    println!("{}", "Type 'help' for a list of commands.".dimmed());
    println!();
}

pub fn print_help() {
    println!("{}", "Commands:".bold());
    let rows = [
        ("h, help", "Show this help"),
        ("loadcsv, setcsv <path>", "Load a structure profile (CSV)"),
        ("setimg, loadimg, setbin, loadbin <path>", "Load a binary image"),
        ("showcsv", "Print the loaded profile"),
        ("status", "Show loaded files and generated outputs"),
        ("list", "Resolve every structure and list offsets"),
        ("hex <offset> <size> [w=N] [extract|-e]", "Hexdump a raw region"),
        (
            "aa, analyze_abs <name> [w=N] [extract|-e]",
            "Hexdump a structure at its declared offset and size",
        ),
        (
            "ar, analyze_rel <name> [w=N] [extract|-e]",
            "Resolve a structure, correct the profile, and hexdump it",
        ),
        ("exit, quit", "Leave the shell"),
    ];
    for (usage, description) in rows {
        println!("  {:<44} {}", usage.green(), description);
    }
    println!();
    println!(
        "{}",
        "Numbers accept 0x, 0o and 0b prefixes. Quote paths containing spaces.".dimmed()
    );
}
