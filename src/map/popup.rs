use crate::feeds::EarthquakeEvent;

/// Popup text for an earthquake marker
///
/// `Magnitude: <mag><br>Depth: <depth> km<br>Location: <place>`. The place
/// comes from the feed and is escaped; the numbers are printed as-is.
pub fn popup_text(event: &EarthquakeEvent) -> String {
    format!(
        "Magnitude: {}<br>Depth: {} km<br>Location: {}",
        event.magnitude,
        event.depth_km,
        escape_html(&event.place)
    )
}

/// Escape text for inclusion in HTML
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_popup_text_format() {
        let event = EarthquakeEvent::new(4.5, 10.2, "8 km NW of The Geysers, CA", -122.8, 38.8);
        assert_eq!(
            popup_text(&event),
            "Magnitude: 4.5<br>Depth: 10.2 km<br>Location: 8 km NW of The Geysers, CA"
        );
    }

    #[test]
    fn test_popup_integral_values_and_empty_place() {
        let event = EarthquakeEvent::new(3.0, -1.0, "", 0.0, 0.0);
        assert_eq!(popup_text(&event), "Magnitude: 3<br>Depth: -1 km<br>Location: ");
    }

    #[test]
    fn test_popup_escapes_place() {
        let event = EarthquakeEvent::new(1.0, 1.0, "<script>alert('x')</script> & co", 0.0, 0.0);
        let text = popup_text(&event);
        assert!(!text.contains("<script>"));
        assert!(text.ends_with("&lt;script&gt;alert(&#39;x&#39;)&lt;/script&gt; &amp; co"));
    }
}
