use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use cut_core::{engine, export, trends};
use cut_core::{
    Config, DayType, Error, FoodItem, Macros, NewMeal, NewTraining, Result, Store, TrainingType,
};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cutt")]
#[command(about = "Personal calorie and fat-loss tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override data directory
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show today's budget, intake, and deficit (default)
    Status {
        /// Date to show (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Log a meal, training session, or daily metrics
    Log {
        #[command(subcommand)]
        entry: LogCommands,
    },

    /// Weekly per-day summary
    Week {
        /// Whole weeks back from the current week
        #[arg(long, default_value_t = 0)]
        back: u32,
    },

    /// Rolling averages, streaks, and the projected outcome
    Trends,

    /// Manage the food library
    Food {
        #[command(subcommand)]
        action: FoodCommands,
    },

    /// Export the full state as JSON (or CSV)
    Export {
        /// Export the flattened CSV instead of JSON
        #[arg(long)]
        csv: bool,

        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Import a previously exported JSON state, replacing current data
    Import {
        /// Path to the exported JSON file
        file: PathBuf,
    },

    /// Replace all data with the seeded defaults
    Reset {
        /// Confirm the reset
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum LogCommands {
    /// Log a meal (from name/calories/macros, or a template)
    Meal {
        /// Meal name (required unless --template is used)
        #[arg(long)]
        name: Option<String>,

        /// Calories; omitted or zero derives them from the macros
        #[arg(long, default_value_t = 0)]
        calories: i32,

        #[arg(long, default_value_t = 0.0)]
        protein: f64,

        #[arg(long, default_value_t = 0.0)]
        carbs: f64,

        #[arg(long, default_value_t = 0.0)]
        fat: f64,

        /// Time of the meal, HH:MM (defaults to now)
        #[arg(long)]
        time: Option<String>,

        /// Expand a saved meal template by id or name
        #[arg(long, conflicts_with = "name")]
        template: Option<String>,

        /// Date to log on (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Log a training session
    Training {
        /// Session type: hybrid, pilates, run-z2, run, strength, walk, rest
        #[arg(long)]
        kind: String,

        #[arg(long)]
        duration_min: i32,

        #[arg(long)]
        distance_km: Option<f64>,

        /// Rate of perceived exertion, 1-10
        #[arg(long)]
        rpe: Option<u8>,

        #[arg(long)]
        calories_burned: Option<i32>,

        /// Date to log on (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Record daily body metrics
    Metrics {
        #[arg(long)]
        weight_kg: Option<f64>,

        #[arg(long)]
        steps: Option<u32>,

        #[arg(long)]
        water_liters: Option<f64>,

        #[arg(long)]
        sleep_hours: Option<f64>,

        /// Mood rating, 1-5
        #[arg(long)]
        mood: Option<u8>,

        /// Override the day type: hybrid, running, pilates, rest
        #[arg(long)]
        day_type: Option<String>,

        /// Date to log on (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[derive(Subcommand)]
enum FoodCommands {
    /// List the food library
    List,

    /// Add a food item
    Add {
        #[arg(long)]
        name: String,

        #[arg(long)]
        serving_grams: f64,

        /// Calories per serving; omitted or zero derives them from macros
        #[arg(long, default_value_t = 0)]
        calories: i32,

        #[arg(long, default_value_t = 0.0)]
        protein: f64,

        #[arg(long, default_value_t = 0.0)]
        carbs: f64,

        #[arg(long, default_value_t = 0.0)]
        fat: f64,

        #[arg(long)]
        category: Option<String>,
    },

    /// Remove a food item by id
    Remove {
        id: String,
    },
}

fn main() -> Result<()> {
    // Initialize logging
    cut_core::logging::init();

    let cli = Cli::parse();

    // Determine data directory
    let config = Config::load()?;
    let data_dir = cli.data_dir.unwrap_or_else(|| config.data.data_dir.clone());
    let state_path = data_dir.join("state.json");
    let params = config.engine.params();

    let today = Local::now().date_naive();

    match cli.command {
        Some(Commands::Status { date }) => {
            cmd_status(&state_path, &params, date.unwrap_or(today))
        }
        Some(Commands::Log { entry }) => cmd_log(&state_path, &params, entry, today),
        Some(Commands::Week { back }) => cmd_week(&state_path, &params, today, back),
        Some(Commands::Trends) => cmd_trends(&state_path, &params, today),
        Some(Commands::Food { action }) => cmd_food(&state_path, action),
        Some(Commands::Export { csv, out }) => cmd_export(&state_path, csv, out),
        Some(Commands::Import { file }) => cmd_import(&state_path, &file),
        Some(Commands::Reset { yes }) => cmd_reset(&state_path, yes),
        None => cmd_status(&state_path, &params, today),
    }
}

fn cmd_status(state_path: &PathBuf, params: &engine::EngineParams, date: NaiveDate) -> Result<()> {
    let store = Store::open(state_path)?;
    let profile = store.profile();
    let log = store.state().log(date);

    let day_type = engine::day_type(log, date);
    let target = engine::calorie_target(profile, day_type);
    let eaten = engine::total_meal_calories(log);
    let exercise = engine::exercise_calories(log);
    let remaining = engine::calories_remaining(profile, log, date);
    let macros = engine::total_macros(log);
    let deficit = engine::day_deficit(profile, params, log, date);

    println!("── {} · {} day ──", date, day_type_label(day_type));
    println!();
    println!("  Target:    {} kcal", target);
    println!("  Eaten:     {} kcal", eaten);
    if exercise > 0 {
        let counted = if profile.count_exercise_calories {
            "added to budget"
        } else {
            "not added to budget"
        };
        println!("  Exercise:  {} kcal ({})", exercise, counted);
    }
    println!("  Remaining: {} kcal", remaining);
    println!();
    println!(
        "  Protein:   {:.0} / {} g   Carbs: {:.0} g   Fat: {:.0} g",
        macros.protein, profile.protein_target_g, macros.carbs, macros.fat
    );

    if let Some(log) = log {
        if log.has_meals() {
            println!("  Est. deficit: {:.0} kcal", deficit);
        }
        if !log.training.is_empty() {
            let sessions: Vec<String> = log
                .training
                .iter()
                .map(|t| format!("{} {}min", t.kind.label(), t.duration_min))
                .collect();
            println!("  Training:  {}", sessions.join(", "));
        }
    }

    Ok(())
}

fn cmd_log(
    state_path: &PathBuf,
    params: &engine::EngineParams,
    entry: LogCommands,
    today: NaiveDate,
) -> Result<()> {
    let mut store = Store::open(state_path)?;

    match entry {
        LogCommands::Meal {
            name,
            calories,
            protein,
            carbs,
            fat,
            time,
            template,
            date,
        } => {
            let date = date.unwrap_or(today);
            let time = time.unwrap_or_else(|| Local::now().format("%H:%M").to_string());

            let meal = if let Some(key) = template {
                let template = store
                    .find_template(&key)
                    .ok_or_else(|| Error::Other(format!("No meal template named '{}'", key)))?;
                NewMeal {
                    time,
                    name: template.name.clone(),
                    calories: template.total_calories(),
                    macros: template.total_macros(),
                    notes: None,
                }
            } else {
                let name = name
                    .ok_or_else(|| Error::Other("Either --name or --template is required".into()))?;
                NewMeal {
                    time,
                    name,
                    calories,
                    macros: Macros {
                        protein,
                        carbs,
                        fat,
                    },
                    notes: None,
                }
            };

            let meal_name = meal.name.clone();
            store.add_meal(date, meal)?;

            let log = store.day_log(date);
            let remaining = engine::calories_remaining(store.profile(), Some(&log), date);
            let logged = log.meals.last().expect("meal was just added");
            println!(
                "✓ Logged {} ({} kcal), {} kcal remaining on {}",
                meal_name, logged.calories, remaining, date
            );
            Ok(())
        }

        LogCommands::Training {
            kind,
            duration_min,
            distance_km,
            rpe,
            calories_burned,
            date,
        } => {
            let kind = parse_training_type(&kind)?;
            let date = date.unwrap_or(today);

            store.add_training(
                date,
                NewTraining {
                    kind,
                    duration_min,
                    distance_km,
                    rpe,
                    calories_burned,
                    notes: None,
                },
            )?;

            let streak = trends::training_streak(params, &store.state().logs, today);
            println!(
                "✓ Logged {} ({} min) on {}, training streak: {} days",
                kind.label(),
                duration_min,
                date,
                streak
            );
            Ok(())
        }

        LogCommands::Metrics {
            weight_kg,
            steps,
            water_liters,
            sleep_hours,
            mood,
            day_type,
            date,
        } => {
            let date = date.unwrap_or(today);
            let override_type = day_type.as_deref().map(parse_day_type).transpose()?;

            if weight_kg.is_none()
                && steps.is_none()
                && water_liters.is_none()
                && sleep_hours.is_none()
                && mood.is_none()
                && override_type.is_none()
            {
                return Err(Error::Other("No metrics given, nothing to record".into()));
            }

            store.update_metrics(date, |m| {
                if weight_kg.is_some() {
                    m.weight_kg = weight_kg;
                }
                if steps.is_some() {
                    m.steps = steps;
                }
                if water_liters.is_some() {
                    m.water_liters = water_liters;
                }
                if sleep_hours.is_some() {
                    m.sleep_hours = sleep_hours;
                }
                if mood.is_some() {
                    m.mood = mood;
                }
                if override_type.is_some() {
                    m.day_type_override = override_type;
                }
            })?;

            println!("✓ Recorded metrics for {}", date);
            Ok(())
        }
    }
}

fn cmd_week(
    state_path: &PathBuf,
    params: &engine::EngineParams,
    today: NaiveDate,
    back: u32,
) -> Result<()> {
    let store = Store::open(state_path)?;
    let profile = store.profile();
    let week = trends::weekly_data(profile, params, &store.state().logs, today, back);

    let first = week.first().expect("week always has seven days");
    let last = week.last().expect("week always has seven days");
    println!("── Week {} .. {} ──", first.date, last.date);
    println!();

    let mut sessions = 0;
    let mut run_minutes = 0;
    for day in &week {
        let deficit = day
            .deficit
            .map(|d| format!("{:>+5.0}", d))
            .unwrap_or_else(|| "    —".into());
        let training: Vec<String> = day
            .training
            .iter()
            .map(|t| format!("{} {}min", t.kind.label(), t.duration_min))
            .collect();

        println!(
            "  {} {}  {:>4}/{:<4} kcal  {:>3.0} g protein  deficit {}  {}",
            day.label,
            day.date,
            day.calories,
            day.target,
            day.protein,
            deficit,
            training.join(", ")
        );

        sessions += day.training.len();
        run_minutes += day
            .training
            .iter()
            .filter(|t| matches!(t.kind, TrainingType::RunZ2 | TrainingType::Run))
            .map(|t| t.duration_min)
            .sum::<i32>();
    }

    println!();
    println!("  Sessions: {}   Run minutes: {}", sessions, run_minutes);
    Ok(())
}

fn cmd_trends(state_path: &PathBuf, params: &engine::EngineParams, today: NaiveDate) -> Result<()> {
    let store = Store::open(state_path)?;
    let profile = store.profile();
    let logs = &store.state().logs;

    let rolling = trends::rolling_average(profile, params, logs, today, 7);
    let training = trends::training_streak(params, logs, today);
    let adherence = trends::adherence_streak(profile, params, logs, today);
    let accumulated =
        engine::accumulated_deficit(profile, params, logs, profile.start_date, today, today);
    let lost = engine::projected_fat_loss(params, accumulated);
    let outcome = trends::projected_outcome(profile, params, logs, today);
    let days_left = engine::days_remaining(profile.goal_date, today);
    let days_in = engine::days_elapsed(profile.start_date, today);

    println!("── Trends ──");
    println!();
    println!("  7-day averages:");
    println!("    Calories: {:.0} kcal", rolling.avg_calories);
    println!("    Protein:  {:.0} g", rolling.avg_protein);
    println!("    Deficit:  {:.0} kcal", rolling.avg_deficit);
    println!();
    println!("  Training streak:  {} days", training);
    println!("  Adherence streak: {} days", adherence);
    println!();
    println!(
        "  Accumulated deficit since {} (day {}): {:.0} kcal ({:+.2} kg)",
        profile.start_date, days_in, accumulated, lost
    );
    println!(
        "  Goal {} ({} days left, target {:.1} kg)",
        profile.goal_date, days_left, profile.goal_fat_loss_kg
    );
    println!(
        "  Projected by goal date: {:.2} / {:.2} / {:.2} kg (low/mid/high)",
        outcome.low, outcome.mid, outcome.high
    );
    Ok(())
}

fn cmd_food(state_path: &PathBuf, action: FoodCommands) -> Result<()> {
    let mut store = Store::open(state_path)?;

    match action {
        FoodCommands::List => {
            for food in &store.state().foods {
                println!(
                    "  {:<10} {:<28} {:>4} kcal / {:.0} g  (P {:.1} / C {:.1} / F {:.1}){}",
                    food.id,
                    food.name,
                    food.calories,
                    food.serving_grams,
                    food.macros.protein,
                    food.macros.carbs,
                    food.macros.fat,
                    food.category
                        .as_deref()
                        .map(|c| format!("  [{}]", c))
                        .unwrap_or_default()
                );
            }
            Ok(())
        }

        FoodCommands::Add {
            name,
            serving_grams,
            calories,
            protein,
            carbs,
            fat,
            category,
        } => {
            let macros = Macros {
                protein,
                carbs,
                fat,
            };
            let calories = if calories == 0 {
                engine::calories_from_macros(&macros)
            } else {
                calories
            };
            let id = uuid::Uuid::new_v4().to_string();

            store.add_food(FoodItem {
                id: id.clone(),
                name: name.clone(),
                serving_grams,
                calories,
                macros,
                category,
            })?;

            println!("✓ Added {} ({})", name, id);
            Ok(())
        }

        FoodCommands::Remove { id } => {
            store.remove_food(&id)?;
            println!("✓ Removed {}", id);
            Ok(())
        }
    }
}

fn cmd_export(state_path: &PathBuf, csv: bool, out: Option<PathBuf>) -> Result<()> {
    let store = Store::open(state_path)?;

    let contents = if csv {
        export::export_csv(store.state())?
    } else {
        export::export_json(store.state())?
    };

    match out {
        Some(path) => {
            std::fs::write(&path, &contents)?;
            println!("✓ Exported to {}", path.display());
        }
        None => print!("{}", contents),
    }
    Ok(())
}

fn cmd_import(state_path: &PathBuf, file: &PathBuf) -> Result<()> {
    let contents = std::fs::read_to_string(file)?;
    let state = export::import_json(&contents)?;

    let mut store = Store::open(state_path)?;
    let days = state.logs.len();
    store.replace(state)?;

    println!("✓ Imported {} logged days", days);
    Ok(())
}

fn cmd_reset(state_path: &PathBuf, yes: bool) -> Result<()> {
    if !yes {
        return Err(Error::Other(
            "Reset replaces all data with defaults; pass --yes to confirm".into(),
        ));
    }

    let mut store = Store::open(state_path)?;
    store.reset()?;
    println!("✓ State reset to seeded defaults");
    Ok(())
}

fn day_type_label(day_type: DayType) -> &'static str {
    match day_type {
        DayType::Hybrid => "Hybrid",
        DayType::Running => "Running",
        DayType::Pilates => "Pilates",
        DayType::Rest => "Rest",
    }
}

fn parse_training_type(s: &str) -> Result<TrainingType> {
    let normalized = s.to_lowercase().replace(['-', '_', ' '], "");
    let kind = match normalized.as_str() {
        "hybrid" => TrainingType::Hybrid,
        "pilates" => TrainingType::Pilates,
        "runz2" => TrainingType::RunZ2,
        "run" => TrainingType::Run,
        "strength" => TrainingType::Strength,
        "walk" => TrainingType::Walk,
        "rest" => TrainingType::Rest,
        _ => {
            let known: Vec<&str> = TrainingType::ALL.iter().map(|t| t.label()).collect();
            return Err(Error::Other(format!(
                "Unknown training type '{}'. Known types: {}",
                s,
                known.join(", ")
            )));
        }
    };
    Ok(kind)
}

fn parse_day_type(s: &str) -> Result<DayType> {
    match s.to_lowercase().as_str() {
        "hybrid" => Ok(DayType::Hybrid),
        "running" => Ok(DayType::Running),
        "pilates" => Ok(DayType::Pilates),
        "rest" => Ok(DayType::Rest),
        _ => Err(Error::Other(format!(
            "Unknown day type '{}'. Known types: hybrid, running, pilates, rest",
            s
        ))),
    }
}
