//! Per-monitor fragment rendering.
//!
//! [`render`] turns one monitor's [`ScreenState`] into a lemonbar markup
//! fragment.  It is a pure function: the same inputs always produce the
//! same fragment.
//!
//! A fragment looks like this (colours from [`ThemeConfig::default`]):
//!
//! ```text
//! %{SnHDMI-1}|%{B#39c488} 1 %{B-}|%{B#004C98} 3 %{B-}%{F#FF00FF}|%{F-}%{B#D7C72F}[Scr:HDMI-1][N:0][A:2][L:tile]%{B-}
//! ```
//!
//! followed, when a window is focused, by a centred title segment.

use crate::config::ThemeConfig;
use crate::snapshot::{DesktopState, ScreenState};
use std::fmt::Write;

/// Render the fragment for `monitor`.
///
/// Desktops are shown in ascending `number` order (ties broken by label).
/// Empty, unfocused desktops are left out.  If more than one desktop claims
/// to be current, the first in display order wins and the others are
/// treated as ordinary desktops.
pub fn render(monitor: &str, screen: &ScreenState, desktop_mode: &str, theme: &ThemeConfig) -> String {
    let mut out = String::new();
    let mut status = String::new();

    // `write!` into a `String` cannot fail.
    let _ = write!(out, "%{{Sn{}}}", monitor);

    let mut current_seen = false;
    for (label, desk) in sorted_desktops(screen) {
        if desk.is_current && !current_seen {
            current_seen = true;
            let _ = write!(out, "|%{{B{}}} {} %{{B-}}", theme.current_bg, label);
            let _ = write!(
                status,
                "%{{B{}}}[Scr:{}][N:{}][A:{}][L:{}]%{{B-}}",
                theme.status_bg, monitor, screen.randr_order, desk.number_of_clients, desktop_mode
            );
        } else if desk.number_of_clients > 0 {
            let _ = write!(out, "|%{{B{}}} {} %{{B-}}", theme.occupied_bg, label);
        }
    }

    let _ = write!(out, "%{{F{}}}|%{{F-}}{}", theme.separator_fg, status);

    if !screen.current_client.is_empty() {
        let pad = " ".repeat(theme.title_padding);
        let _ = write!(
            out,
            "%{{c}}%{{U{}}}%{{+u}}%{{+o}}%{{B{}}}%{{F-}}{pad}{}{pad}%{{-u}}%{{-o}}%{{B-}}",
            theme.title_line,
            theme.title_bg,
            screen.current_client,
            pad = pad
        );
    }

    out
}

/// Desktops in display order: by `number`, then by label.
fn sorted_desktops(screen: &ScreenState) -> Vec<(&str, &DesktopState)> {
    let mut desktops: Vec<_> = screen
        .desktops
        .iter()
        .map(|(label, desk)| (label.as_str(), desk))
        .collect();
    desktops.sort_by(|a, b| a.1.number.cmp(&b.1.number).then_with(|| a.0.cmp(b.0)));
    desktops
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desk(number: i64, is_current: bool, clients: u32) -> DesktopState {
        DesktopState {
            number,
            is_current,
            is_urgent: false,
            number_of_clients: clients,
        }
    }

    fn screen(desktops: &[(&str, DesktopState)]) -> ScreenState {
        ScreenState {
            current_client: String::new(),
            randr_order: 0,
            desktops: desktops.iter().map(|(l, d)| (l.to_string(), *d)).collect(),
        }
    }

    fn r(monitor: &str, screen: &ScreenState) -> String {
        render(monitor, screen, "tile", &ThemeConfig::default())
    }

    #[test]
    fn single_current_desktop() {
        let s = screen(&[("1", desk(1, true, 2))]);
        assert_eq!(
            r("HDMI-1", &s),
            "%{SnHDMI-1}|%{B#39c488} 1 %{B-}%{F#FF00FF}|%{F-}%{B#D7C72F}[Scr:HDMI-1][N:0][A:2][L:tile]%{B-}"
        );
    }

    #[test]
    fn occupied_and_empty_desktops() {
        let s = screen(&[
            ("1", desk(1, true, 0)),
            ("2", desk(2, false, 0)),
            ("3", desk(3, false, 5)),
        ]);
        let out = r("DP-1", &s);
        assert_eq!(
            out,
            "%{SnDP-1}|%{B#39c488} 1 %{B-}|%{B#004C98} 3 %{B-}%{F#FF00FF}|%{F-}%{B#D7C72F}[Scr:DP-1][N:0][A:0][L:tile]%{B-}"
        );
        assert!(!out.contains(" 2 "));
    }

    #[test]
    fn desktops_are_ordered_by_number_not_label() {
        // Labels sort the opposite way to numbers.
        let s = screen(&[
            ("a", desk(3, false, 1)),
            ("b", desk(1, false, 1)),
            ("c", desk(2, false, 1)),
        ]);
        let out = r("M", &s);
        let pos = |label: &str| out.find(&format!(" {} ", label)).unwrap();
        assert!(pos("b") < pos("c"));
        assert!(pos("c") < pos("a"));
    }

    #[test]
    fn equal_numbers_fall_back_to_label() {
        let s = screen(&[("z", desk(1, false, 1)), ("y", desk(1, false, 1))]);
        let out = r("M", &s);
        assert!(out.find(" y ").unwrap() < out.find(" z ").unwrap());
    }

    #[test]
    fn no_current_desktop_means_empty_status() {
        let s = screen(&[("1", desk(1, false, 1))]);
        assert_eq!(r("M", &s), "%{SnM}|%{B#004C98} 1 %{B-}%{F#FF00FF}|%{F-}");
    }

    #[test]
    fn first_current_desktop_wins() {
        let s = screen(&[
            ("two", desk(2, true, 3)),
            ("one", desk(1, true, 1)),
            ("three", desk(3, true, 0)),
        ]);
        let out = r("M", &s);
        assert_eq!(out.matches("%{B#39c488}").count(), 1);
        assert!(out.contains("|%{B#39c488} one %{B-}"));
        // The losing current desktop with windows is shown as occupied,
        // the one without windows is suppressed.
        assert!(out.contains("|%{B#004C98} two %{B-}"));
        assert!(!out.contains("three"));
        assert_eq!(out.matches("[Scr:").count(), 1);
        assert!(out.contains("[A:1]"));
    }

    #[test]
    fn status_segment_carries_snapshot_values() {
        let mut s = screen(&[("web", desk(4, true, 7))]);
        s.randr_order = 2;
        let out = render("DP-3", &s, "monocle", &ThemeConfig::default());
        assert!(out.contains("[Scr:DP-3][N:2][A:7][L:monocle]"));
    }

    #[test]
    fn focused_window_title_is_padded() {
        let mut s = screen(&[("1", desk(1, true, 1))]);
        s.current_client = "xterm".into();
        let out = r("M", &s);
        assert!(out.ends_with(
            "%{c}%{U#00FF00}%{+u}%{+o}%{B#AC59FF}%{F-}        xterm        %{-u}%{-o}%{B-}"
        ));
    }

    #[test]
    fn theme_overrides_colours_and_padding() {
        let theme = ThemeConfig {
            current_bg: "#000001".into(),
            title_padding: 1,
            ..ThemeConfig::default()
        };
        let mut s = screen(&[("1", desk(1, true, 1))]);
        s.current_client = "t".into();
        let out = render("M", &s, "", &theme);
        assert!(out.contains("%{B#000001} 1 %{B-}"));
        assert!(out.contains("%{F-} t %{-u}"));
    }

    #[test]
    fn rendering_is_deterministic() {
        let s = screen(&[
            ("1", desk(1, true, 2)),
            ("2", desk(2, false, 1)),
            ("3", desk(3, false, 0)),
        ]);
        assert_eq!(r("M", &s), r("M", &s.clone()));
    }

    #[test]
    fn no_desktops_still_renders_marker_and_separator() {
        assert_eq!(r("M", &ScreenState::default()), "%{SnM}%{F#FF00FF}|%{F-}");
    }
}
