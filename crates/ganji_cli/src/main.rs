mod logging;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ganji_base::{
    ALL_ELEMENTS, Branch, Direction, ElementPercent, FourPillars, GanZhi, Gender, Layer,
    LuckEvent, LuckPeriod, Stem, StrengthLayers, TenGodTarget, blend_tab, classify,
    ten_god_percent,
};
use ganji_config::{CONFIG_PATH_ENV, GanjiConfig};
use ganji_search::{LuckCycleBuilder, PillarResolver, SolarTermCache};
use ganji_time::CivilTime;
use serde::Serialize;
use tracing::debug;

#[derive(Parser)]
#[command(name = "ganji", about = "Four-pillar charts, luck cycles and element strength")]
struct Cli {
    /// TOML config file (defaults to $GANJI_CONFIG, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Four pillars for a local civil time
    Chart {
        /// Local time (YYYY-MM-DDThh:mm, or YYYY-MM-DD with --unknown-hour)
        date: String,
        /// Birth hour is unknown; omit the hour pillar
        #[arg(long)]
        unknown_hour: bool,
    },
    /// Decade luck pillars, or the natal pillar stepped at another period
    Luck {
        /// Local birth time
        date: String,
        /// male | female (남 | 여)
        #[arg(long)]
        gender: String,
        /// decades | years | months | two-hours
        #[arg(long, default_value = "decades")]
        period: String,
        /// Override the direction: forward | backward
        #[arg(long)]
        direction: Option<String>,
        #[arg(long)]
        unknown_hour: bool,
    },
    /// Year pillars (세운) for consecutive years, or for the years in force
    /// between two local times
    Sewoon {
        /// Local birth time (for ages)
        date: String,
        /// First Gregorian year
        #[arg(long, required_unless_present = "since", conflicts_with = "since")]
        from: Option<i32>,
        #[arg(long, default_value = "10")]
        count: u32,
        /// Window start, local time (e.g. a decade pillar's start)
        #[arg(long, requires = "until")]
        since: Option<String>,
        /// Window end, local time
        #[arg(long, requires = "since")]
        until: Option<String>,
    },
    /// Month pillars (월운) of the year opened by 입춘 of YEAR
    Wolwoon {
        /// Local birth time (for ages)
        date: String,
        #[arg(long)]
        year: i32,
    },
    /// Day pillars (일운) of a civil month
    Ilwoon {
        /// Local birth time (for ages)
        date: String,
        #[arg(long)]
        year: i32,
        #[arg(long)]
        month: u32,
    },
    /// Two-hour pillars (시운) of a civil date
    Siun {
        /// Local birth time (for ages)
        date: String,
        /// Civil date (YYYY-MM-DD)
        #[arg(long)]
        day: String,
    },
    /// Element percentages for a chart blended with luck pillars
    Strength {
        /// Local birth time
        date: String,
        /// natal | decade | year | month | day (원국 | 대운 | 세운 | 월운 | 일운)
        #[arg(long, default_value = "natal")]
        tab: String,
        /// Decade pillar, e.g. 임오
        #[arg(long)]
        decade: Option<String>,
        /// Year pillar
        #[arg(long)]
        year: Option<String>,
        /// Month pillar
        #[arg(long)]
        month: Option<String>,
        /// Day pillar
        #[arg(long)]
        day: Option<String>,
        #[arg(long)]
        unknown_hour: bool,
    },
    /// Ten-god percentages of a chart
    TenGods {
        /// Local birth time
        date: String,
        #[arg(long)]
        unknown_hour: bool,
    },
    /// Ten god of a stem or branch relative to a day master
    TenGod {
        /// Day master stem, e.g. 갑 or 甲
        day_master: String,
        /// Stem or branch, e.g. 경 or 子
        target: String,
    },
    /// The 24 solar terms of a Gregorian year
    Terms {
        year: i32,
    },
}

#[derive(Serialize)]
struct LuckReport<'a> {
    direction: Direction,
    period: LuckPeriod,
    #[serde(skip_serializing_if = "Option::is_none")]
    luck_number: Option<f64>,
    events: &'a [LuckEvent],
}

#[derive(Serialize)]
struct StrengthReport {
    tab: Layer,
    pillars: FourPillars,
    elements: ElementPercent,
}

fn main() {
    logging::init();
    let cli = Cli::parse();
    let config = load_config(cli.config.as_ref());
    let cache = SolarTermCache::default();
    let resolver = or_exit(PillarResolver::new(&cache, config.chart.to_chart_options()));
    let offset = config.chart.utc_offset_minutes;

    match cli.command {
        Commands::Chart { date, unknown_hour } => {
            let birth = require_birth(&date, unknown_hour);
            let info = or_exit(resolver.chart(&birth, !unknown_hour));
            if cli.json {
                print_json(&info);
                return;
            }
            println!("Chart: {}", info.pillars);
            println!(
                "  Year:  {} (from {})",
                info.year.ganzhi,
                resolver.to_civil(info.year.start_jd)
            );
            println!(
                "  Month: {} (month {}, {} at {})",
                info.month.ganzhi,
                info.month.month_index,
                info.month.term,
                resolver.to_civil(info.month.start_jd)
            );
            println!("  Day:   {}", info.pillars.day);
            match info.pillars.hour {
                Some(h) => println!("  Hour:  {h}"),
                None => println!("  Hour:  unknown"),
            }
            println!("  Day master: {}", info.pillars.day_master().hangul());
        }

        Commands::Luck {
            date,
            gender,
            period,
            direction,
            unknown_hour,
        } => {
            let birth = require_birth(&date, unknown_hour);
            let builder = or_exit(LuckCycleBuilder::new(resolver, config.chart.to_luck_options()));
            let gender = require_gender(&gender);
            let period = require_period(&period);
            let direction = match direction {
                Some(d) => require_direction(&d),
                None => or_exit(builder.direction_for(gender, &birth)),
            };
            if period == LuckPeriod::TwoHours && unknown_hour {
                eprintln!("Two-hour luck needs a known birth hour");
                std::process::exit(1);
            }
            let (events, luck_number) = if period == LuckPeriod::Decades {
                let cycle = or_exit(builder.daewoon(&birth, direction));
                (cycle.events, Some(cycle.start.luck_number))
            } else {
                (or_exit(builder.stepped(&birth, direction, period)), None)
            };
            if cli.json {
                print_json(&LuckReport {
                    direction,
                    period,
                    luck_number,
                    events: &events,
                });
                return;
            }
            println!("Direction: {direction:?}");
            if let Some(n) = luck_number {
                println!("Luck number: {n:.2}");
            }
            print_events(&events, offset);
        }

        Commands::Sewoon {
            date,
            from,
            count,
            since,
            until,
        } => {
            let (builder, birth_jd) = luck_builder(&resolver, &config, &date);
            let events = match (from, since, until) {
                (Some(from), _, _) => or_exit(builder.sewoon_years(birth_jd, from, count)),
                (None, Some(since), Some(until)) => {
                    let start_jd = or_exit(resolver.to_jd(&require_civil(&since)));
                    let end_jd = or_exit(resolver.to_jd(&require_civil(&until)));
                    or_exit(builder.sewoon(birth_jd, start_jd, end_jd))
                }
                _ => {
                    eprintln!("Sewoon needs --from or --since with --until");
                    std::process::exit(1);
                }
            };
            emit_events(&events, offset, cli.json);
        }

        Commands::Wolwoon { date, year } => {
            let (builder, birth_jd) = luck_builder(&resolver, &config, &date);
            let events = or_exit(builder.wolwoon(birth_jd, year));
            emit_events(&events, offset, cli.json);
        }

        Commands::Ilwoon { date, year, month } => {
            let (builder, birth_jd) = luck_builder(&resolver, &config, &date);
            let events = or_exit(builder.ilwoon(birth_jd, year, month));
            emit_events(&events, offset, cli.json);
        }

        Commands::Siun { date, day } => {
            let (builder, birth_jd) = luck_builder(&resolver, &config, &date);
            let day = require_civil(&day);
            let events = or_exit(builder.siun(birth_jd, &day));
            emit_events(&events, offset, cli.json);
        }

        Commands::Strength {
            date,
            tab,
            decade,
            year,
            month,
            day,
            unknown_hour,
        } => {
            let birth = require_birth(&date, unknown_hour);
            let pillars = or_exit(resolver.four_pillars(&birth, !unknown_hour));
            let tab = require_layer(&tab);
            let mut layers = StrengthLayers::natal(pillars);
            for (layer, value) in [
                (Layer::Decade, decade),
                (Layer::Year, year),
                (Layer::Month, month),
                (Layer::Day, day),
            ] {
                if let Some(v) = value {
                    layers = layers.with(layer, require_ganzhi(&v));
                }
            }
            let policy = config.strength.to_policy();
            let elements = blend_tab(&layers, &config.strength.blend, tab, &policy);
            debug!(%tab, %pillars, "blended strength");
            if cli.json {
                print_json(&StrengthReport {
                    tab,
                    pillars,
                    elements,
                });
                return;
            }
            println!("Chart: {pillars}  Tab: {tab}");
            for e in ALL_ELEMENTS {
                println!("  {} ({}): {:>3}%", e.hangul(), e.hanja(), elements.get(e));
            }
            if let Some(e) = elements.dominant() {
                println!("  Dominant: {}", e.hangul());
            }
        }

        Commands::TenGods { date, unknown_hour } => {
            let birth = require_birth(&date, unknown_hour);
            let pillars = or_exit(resolver.four_pillars(&birth, !unknown_hour));
            let percent = ten_god_percent(&pillars);
            if cli.json {
                print_json(&percent);
                return;
            }
            println!(
                "Chart: {pillars}  Day master: {}",
                pillars.day_master().hangul()
            );
            for (god, pct) in percent.entries() {
                println!("  {} ({}): {:>3}%", god.hangul(), god.hanja(), pct);
            }
        }

        Commands::TenGod { day_master, target } => {
            let day_master = require_stem(&day_master);
            let target = require_target(&target);
            let god = classify(day_master, target);
            if cli.json {
                print_json(&god);
                return;
            }
            println!("{} ({})", god.hangul(), god.hanja());
        }

        Commands::Terms { year } => {
            let obs = config.chart.observer_longitude_deg;
            let terms = or_exit(cache.terms_in_year(year, obs));
            if cli.json {
                print_json(&terms);
                return;
            }
            for ev in terms {
                let marker = if ev.term.is_month_start() { "*" } else { " " };
                println!(
                    "{marker} {} ({}) {:>5.1} deg  {}",
                    ev.term.hangul(),
                    ev.term.hanja(),
                    ev.term.longitude_deg(),
                    resolver.to_civil(ev.jd)
                );
            }
        }
    }
}

fn load_config(path: Option<&PathBuf>) -> GanjiConfig {
    let path = path
        .cloned()
        .or_else(|| std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from));
    match path {
        Some(p) => GanjiConfig::load(&p).unwrap_or_else(|e| {
            eprintln!("Failed to load config: {e}");
            std::process::exit(1);
        }),
        None => GanjiConfig::default(),
    }
}

fn luck_builder<'a>(
    resolver: &PillarResolver<'a>,
    config: &GanjiConfig,
    date: &str,
) -> (LuckCycleBuilder<'a>, f64) {
    let birth = require_civil(date);
    let builder = or_exit(LuckCycleBuilder::new(
        *resolver,
        config.chart.to_luck_options(),
    ));
    let birth_jd = or_exit(resolver.to_jd(&birth));
    (builder, birth_jd)
}

fn emit_events(events: &[LuckEvent], offset: i32, json: bool) {
    if json {
        print_json(&events);
    } else {
        print_events(events, offset);
    }
}

fn print_events(events: &[LuckEvent], offset: i32) {
    for ev in events {
        println!(
            "  {}  age {:>3}  from {}",
            ev.ganzhi,
            ev.age,
            ev.local_time(offset)
        );
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Failed to encode JSON: {e}");
            std::process::exit(1);
        }
    }
}

fn or_exit<T, E: std::fmt::Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn require_civil(s: &str) -> CivilTime {
    s.parse().unwrap_or_else(|e| {
        eprintln!("Invalid date '{s}': {e}");
        std::process::exit(1);
    })
}

/// Birth reading; an unknown hour is read at noon.
fn require_birth(s: &str, unknown_hour: bool) -> CivilTime {
    let civil = require_civil(s);
    if unknown_hour {
        civil.with_time(12, 0)
    } else {
        civil
    }
}

fn require_ganzhi(s: &str) -> GanZhi {
    s.parse().unwrap_or_else(|e| {
        eprintln!("Invalid pillar '{s}': {e}");
        std::process::exit(1);
    })
}

fn require_layer(s: &str) -> Layer {
    s.parse().unwrap_or_else(|_| {
        eprintln!("Invalid tab: {s} (natal, decade, year, month, day)");
        std::process::exit(1);
    })
}

fn require_stem(s: &str) -> Stem {
    single_char(s).and_then(Stem::from_char).unwrap_or_else(|| {
        eprintln!("Invalid stem: {s}");
        std::process::exit(1);
    })
}

fn require_target(s: &str) -> TenGodTarget {
    parse_target(s).unwrap_or_else(|| {
        eprintln!("Invalid stem or branch: {s}");
        std::process::exit(1);
    })
}

fn require_gender(s: &str) -> Gender {
    parse_gender(s).unwrap_or_else(|| {
        eprintln!("Invalid gender: {s} (male, female)");
        std::process::exit(1);
    })
}

fn require_period(s: &str) -> LuckPeriod {
    parse_period(s).unwrap_or_else(|| {
        eprintln!("Invalid period: {s} (decades, years, months, two-hours)");
        std::process::exit(1);
    })
}

fn require_direction(s: &str) -> Direction {
    parse_direction(s).unwrap_or_else(|| {
        eprintln!("Invalid direction: {s} (forward, backward)");
        std::process::exit(1);
    })
}

fn single_char(s: &str) -> Option<char> {
    let mut chars = s.trim().chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

fn parse_target(s: &str) -> Option<TenGodTarget> {
    let c = single_char(s)?;
    Stem::from_char(c)
        .map(TenGodTarget::from)
        .or_else(|| Branch::from_char(c).map(TenGodTarget::from))
}

fn parse_gender(s: &str) -> Option<Gender> {
    match s.to_lowercase().as_str() {
        "male" | "m" | "남" => Some(Gender::Male),
        "female" | "f" | "여" => Some(Gender::Female),
        _ => None,
    }
}

fn parse_period(s: &str) -> Option<LuckPeriod> {
    match s.to_lowercase().as_str() {
        "decades" | "decade" | "대운" => Some(LuckPeriod::Decades),
        "years" | "year" | "세운" => Some(LuckPeriod::Years),
        "months" | "month" | "월운" => Some(LuckPeriod::Months),
        "two-hours" | "two_hours" | "hours" | "시운" => Some(LuckPeriod::TwoHours),
        _ => None,
    }
}

fn parse_direction(s: &str) -> Option<Direction> {
    match s.to_lowercase().as_str() {
        "forward" | "순행" => Some(Direction::Forward),
        "backward" | "역행" => Some(Direction::Backward),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn targets_accept_either_script() {
        assert_eq!(parse_target("경"), Some(TenGodTarget::from(Stem::Gyeong)));
        assert_eq!(parse_target("子"), Some(TenGodTarget::from(Branch::Ja)));
        assert_eq!(parse_target("경오"), None);
        assert_eq!(parse_target(""), None);
    }

    #[test]
    fn labels_parse_case_insensitively() {
        assert_eq!(parse_gender("Female"), Some(Gender::Female));
        assert_eq!(parse_gender("남"), Some(Gender::Male));
        assert_eq!(parse_period("Two-Hours"), Some(LuckPeriod::TwoHours));
        assert_eq!(parse_period("weeks"), None);
        assert_eq!(parse_direction("역행"), Some(Direction::Backward));
    }

    #[test]
    fn sewoon_takes_a_year_or_a_window() {
        let by_year =
            Cli::try_parse_from(["ganji", "sewoon", "1990-05-20T14:30", "--from", "2024"]);
        assert!(by_year.is_ok());
        let window = Cli::try_parse_from([
            "ganji",
            "sewoon",
            "1990-05-20T14:30",
            "--since",
            "2024-01-01",
            "--until",
            "2026-01-01",
        ]);
        assert!(window.is_ok());
        assert!(Cli::try_parse_from(["ganji", "sewoon", "1990-05-20T14:30"]).is_err());
        assert!(
            Cli::try_parse_from(["ganji", "sewoon", "1990-05-20T14:30", "--since", "2024-01-01"])
                .is_err()
        );
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
