use skycast_core::{
    CityCard, TemperatureUnit, WeatherSnapshot,
    model::{condition_glyph, format_temperature},
};

/// Print one city card as a single terminal line.
pub fn print_card(card: &CityCard, unit: TemperatureUnit) {
    if card.is_loading {
        println!("  …  {}", card.display_name);
        return;
    }

    match card.temperature_c {
        Some(temp) => {
            let glyph = condition_glyph(&card.condition_label, card.icon_token.as_deref());
            println!(
                "  {glyph}  {:<28} {:>6}  {}",
                card.display_name,
                format_temperature(temp, unit),
                card.condition_label,
            );
        }
        None => {
            println!("  ⚠  {:<28} {}", card.display_name, card.condition_label);
        }
    }
}

/// Print the extra current-location slot above the city list.
pub fn print_location_card(snapshot: &WeatherSnapshot, unit: TemperatureUnit) {
    let mut card = CityCard::from_snapshot(snapshot, false);
    card.display_name = format!("{} (current location)", card.display_name);
    print_card(&card, unit);
}
