//! Dialoguer theme and banner for interactive mode.

use console::{Style, style};
use dialoguer::theme::ColorfulTheme;

/// `ColorfulTheme` with climp's prefixes. Everything renders on stderr.
pub fn climp_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("$".to_string()).for_stderr().magenta(),
        prompt_style: Style::new().for_stderr().bold(),
        prompt_suffix: style("›".to_string()).for_stderr().bright().black(),
        active_item_prefix: style("▸".to_string()).for_stderr().magenta(),
        active_item_style: Style::new().for_stderr().magenta(),
        success_prefix: style("✓".to_string()).for_stderr().green(),
        success_suffix: style("·".to_string()).for_stderr().bright().black(),
        error_prefix: style("✗".to_string()).for_stderr().red(),
        error_style: Style::new().for_stderr().red(),
        values_style: Style::new().for_stderr().green(),
        ..ColorfulTheme::default()
    }
}

pub fn print_banner() {
    let title = format!("climp v{}", env!("CARGO_PKG_VERSION"));
    let tagline = "pick a command, Esc to quit";
    let inner_width = tagline.len().max(title.len()) + 4;

    let magenta = Style::new().for_stderr().magenta();
    eprintln!();
    eprintln!("{}", magenta.apply_to(format!("  ┌{:─<inner_width$}┐", "")));
    eprintln!("{}", magenta.apply_to(format!("  │{title:^inner_width$}│")));
    eprintln!("{}", magenta.apply_to(format!("  │{tagline:^inner_width$}│")));
    eprintln!("{}", magenta.apply_to(format!("  └{:─<inner_width$}┘", "")));
    eprintln!();
}
