//! Style roles expressed as an enum + macro mapping logical names to a
//! `colored::Color` and a bold flag.
//!
//! Coloring is applied only when the `enabled` flag passed to `paint()` is
//! true, so callers decide once (TTY / `--no-color`) and pass it down.
//!
//! ```
//! use sqs_list_filled_queues::core::styles::StyleRole;
//! let plain = StyleRole::Count.paint("12 msgs", false);
//! assert_eq!(plain, "12 msgs");
//! let colored = StyleRole::Count.paint("12 msgs", true);
//! assert!(colored.starts_with("\x1b[92m"));
//! assert!(colored.ends_with("\x1b[0m"));
//! ```

use clap::builder::styling::AnsiColor;
use colored::Color;

macro_rules! style {
    ( $( $variant:ident => ($color:expr, $bold:expr) ),+ $(,)? ) => {
        #[derive(Copy, Clone, Debug, PartialEq, Eq)]
        pub enum StyleRole { $( $variant ),+ }

        impl StyleRole {
            pub fn color(self) -> Option<Color> {
                match self { $( StyleRole::$variant => $color ),+ }
            }

            pub fn is_bold(self) -> bool {
                match self { $( StyleRole::$variant => $bold ),+ }
            }

            /// SGR parameter string, e.g. `1;92`
            pub fn ansi_code(self) -> Option<String> {
                let mut parts = Vec::new();
                if self.is_bold() {
                    parts.push("1".to_string());
                }
                if let Some(code) = self.color().and_then(map_color_code) {
                    parts.push(code);
                }
                if parts.is_empty() { None } else { Some(parts.join(";")) }
            }

            pub fn paint(self, text: &str, enabled: bool) -> String {
                if !enabled { return text.to_string(); }
                if let Some(code) = self.ansi_code() { return format!("\x1b[{}m{}\x1b[0m", code, text); }
                text.to_string()
            }
        }
    }
}

style! {
    Name        => (None, true),
    Count       => (Some(Color::BrightGreen), false),
    Notice      => (None, true),
    Farewell    => (Some(Color::BrightGreen), true),
    Warning     => (Some(Color::Yellow), false),
    Error       => (Some(Color::BrightRed), false),
    Dim         => (Some(Color::BrightBlack), false),
    Header      => (Some(Color::Yellow), true),
    Literal     => (Some(Color::Cyan), false),
    Placeholder => (Some(Color::Green), false),
    Valid       => (Some(Color::Green), false),
    Invalid     => (Some(Color::Red), false),
}

fn map_color_code(c: Color) -> Option<String> {
    use Color::*;
    match c {
        Black => Some("30".to_string()),
        Red => Some("31".to_string()),
        Green => Some("32".to_string()),
        Yellow => Some("33".to_string()),
        Blue => Some("34".to_string()),
        Magenta => Some("35".to_string()),
        Cyan => Some("36".to_string()),
        White => Some("37".to_string()),
        BrightBlack => Some("90".to_string()),
        BrightRed => Some("91".to_string()),
        BrightGreen => Some("92".to_string()),
        BrightYellow => Some("93".to_string()),
        BrightBlue => Some("94".to_string()),
        BrightMagenta => Some("95".to_string()),
        BrightCyan => Some("96".to_string()),
        BrightWhite => Some("97".to_string()),
        TrueColor { r, g, b } => Some(format!("38;2;{};{};{}", r, g, b)),
    }
}

fn color_to_ansi(c: Color) -> Option<AnsiColor> {
    use AnsiColor as A;
    use Color::*;
    Some(match c {
        Black => A::Black,
        Red => A::Red,
        Green => A::Green,
        Yellow => A::Yellow,
        Blue => A::Blue,
        Magenta => A::Magenta,
        Cyan => A::Cyan,
        White => A::White,
        BrightBlack => A::BrightBlack,
        BrightRed => A::BrightRed,
        BrightGreen => A::BrightGreen,
        BrightYellow => A::BrightYellow,
        BrightBlue => A::BrightBlue,
        BrightMagenta => A::BrightMagenta,
        BrightCyan => A::BrightCyan,
        BrightWhite => A::BrightWhite,
        _ => return None,
    })
}

/// Build clap Styles for help output from the style roles.
pub fn palette_to_clap(enabled: bool) -> clap::builder::Styles {
    use clap::builder::styling::{Color as ClapColor, Style};
    if !enabled {
        return clap::builder::Styles::plain();
    }

    let style = |role: StyleRole| {
        let mut s = Style::new();
        if let Some(col) = role.color().and_then(color_to_ansi) {
            s = s.fg_color(Some(ClapColor::Ansi(col)));
        }
        if role.is_bold() {
            s = s.bold();
        }
        s
    };

    clap::builder::Styles::styled()
        .header(style(StyleRole::Header))
        .usage(style(StyleRole::Header))
        .literal(style(StyleRole::Literal))
        .placeholder(style(StyleRole::Placeholder))
        .valid(style(StyleRole::Valid))
        .invalid(style(StyleRole::Invalid))
        .error(style(StyleRole::Error))
}
