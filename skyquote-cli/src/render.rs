use skyquote_core::{Field, MemorySink, StatusClass};

/// Render the widget as a plain-text card.
pub fn card(display: &MemorySink) -> String {
    let mut lines = vec![String::new()];

    lines.push(format!("  \"{}\"", display.text(Field::QuoteText)));
    lines.push(format!("      {}", display.text(Field::QuoteAuthor)));
    lines.extend(indented("      ", display.text(Field::QuoteTime)));
    lines.extend(status_line(display, Field::QuoteStatus));

    lines.push(String::new());
    let location = display.text(Field::WeatherLocation);
    if location.is_empty() {
        lines.push("  Weather".to_string());
    } else {
        lines.push(format!("  Weather · {location}"));
    }

    let headline = join_set(
        [Field::WeatherIcon, Field::Temperature, Field::WeatherDescription],
        display,
        "  ",
    );
    lines.extend(indented("  ", headline));

    let details = join_set([Field::FeelsLike, Field::Wind, Field::Humidity], display, " · ");
    lines.extend(indented("  ", details));
    lines.extend(status_line(display, Field::WeatherStatus));
    lines.push(String::new());

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn join_set<const N: usize>(fields: [Field; N], display: &MemorySink, sep: &str) -> String {
    fields
        .into_iter()
        .map(|field| display.text(field))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(sep)
}

fn indented(indent: &str, line: String) -> Option<String> {
    (!line.is_empty()).then(|| format!("{indent}{line}"))
}

fn status_line(display: &MemorySink, field: Field) -> Option<String> {
    let text = display.text(field);
    if text.is_empty() {
        return None;
    }

    let marker = if display.has_class(field, StatusClass::Error) {
        "✗ "
    } else if display.has_class(field, StatusClass::Success) {
        "✓ "
    } else {
        ""
    };
    Some(format!("  {marker}{text}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use skyquote_core::{Markup, PresentationSink};

    #[test]
    fn renders_loaded_widget() {
        let display = MemorySink::new();
        display.set_text(Field::QuoteText, "Be water.");
        display.set_text(Field::QuoteAuthor, "— Bruce Lee");
        display.set_text(Field::QuoteTime, "Updated at 12:00");
        display.set_text(Field::WeatherIcon, "🌤️");
        display.set_markup(Field::Temperature, Markup::Temperature(21));
        display.set_text(Field::WeatherDescription, "mainly clear");
        display.set_text(Field::Humidity, "Humidity: 55%");
        display.set_text(Field::WeatherLocation, "40.00, -73.00");
        display.add_class(Field::WeatherStatus, StatusClass::Success);
        display.set_text(Field::WeatherStatus, "Weather loaded.");

        let card = card(&display);
        assert!(card.contains("\"Be water.\""));
        assert!(card.contains("— Bruce Lee"));
        assert!(card.contains("Weather · 40.00, -73.00"));
        assert!(card.contains("🌤️  21°C  mainly clear"));
        assert!(card.contains("Humidity: 55%"));
        assert!(card.contains("✓ Weather loaded."));
    }

    #[test]
    fn error_status_is_marked() {
        let display = MemorySink::new();
        display.add_class(Field::WeatherStatus, StatusClass::Error);
        display.set_text(Field::WeatherStatus, "Geolocation is not supported by your browser.");

        let card = card(&display);
        assert!(card.contains("✗ Geolocation is not supported"));
        assert!(card.contains("  Weather\n"));
    }

    #[test]
    fn empty_lines_are_skipped() {
        let display = MemorySink::new();
        display.set_text(Field::QuoteText, "x");
        display.set_text(Field::QuoteAuthor, "— y");

        let card = card(&display);
        assert_eq!(card, "\n  \"x\"\n      — y\n\n  Weather\n\n");
    }
}
