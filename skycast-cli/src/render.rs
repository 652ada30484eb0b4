//! Plain-text rendering of forecast snapshots.

use skycast_core::{ForecastSnapshot, Notification, notify::Level};

pub fn toast(toast: &Notification) {
    match toast.level {
        Level::Info => eprintln!("» {}", toast.message),
        Level::Error => eprintln!("✗ {}", toast.message),
    }
}

pub fn snapshot(snapshot: &ForecastSnapshot) {
    let local_time = snapshot
        .local_time()
        .map(|t| t.format("%A, %-d %B %Y %H:%M").to_string())
        .unwrap_or_else(|| snapshot.location.localtime.clone());
    println!("{}  •  {local_time}", snapshot.headline());
    println!();

    let current = &snapshot.current;
    let condition = snapshot.current_condition();
    println!(
        "  {} {:.0}°C  {}  (feels like {:.0}°C)",
        condition.glyph(),
        current.temp_c,
        current.condition.text,
        current.feelslike_c
    );
    println!(
        "  humidity {:.0}%  wind {:.0} km/h {}  pressure {:.0} mb  uv {:.1}",
        current.humidity, current.wind_kph, current.wind_dir, current.pressure_mb, current.uv
    );
    if let Some(category) = current.air_quality.as_ref().and_then(|aq| aq.category()) {
        println!("  air quality {category}");
    }
    println!();

    println!("{}-day forecast", snapshot.days().len());
    for day in snapshot.days() {
        let summary = &day.day;
        println!(
            "  {}  {} {:>3.0}° / {:>3.0}°  rain {:>3}%  {}",
            day.date.format("%a %d %b"),
            summary.condition().glyph(),
            summary.maxtemp_c,
            summary.mintemp_c,
            summary.daily_chance_of_rain,
            summary.condition.text
        );
    }
}
