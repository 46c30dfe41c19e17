//! Summon session simulator binary

use std::path::PathBuf;

use clap::Parser;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use lucky_bastion::core::types::{CellPos, Grade, Percent};
use lucky_bastion::data::load_game_data;
use lucky_bastion::economy::{InGameLedger, ResourceLedger};
use lucky_bastion::presentation::TracingSink;
use lucky_bastion::skills::{SkillBook, SpeedDebuffTarget};
use lucky_bastion::summon::{
    EnforcementLadder, LuckyOffer, StandardDice, SummonError, SummonRequest, Summoner,
};

#[derive(Parser, Debug)]
#[command(name = "summon_sim", about = "Run a summon session against loaded game data")]
struct Args {
    /// Game data document
    #[arg(long, default_value = "data/game.toml")]
    data: PathBuf,

    /// RNG seed for the session
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Normal summon attempts
    #[arg(long, default_value_t = 30)]
    summons: u32,

    /// Enforcement attempts before summoning
    #[arg(long, default_value_t = 2)]
    enforce: u32,

    /// Lucky summon attempts per offered grade
    #[arg(long, default_value_t = 3)]
    lucky: u32,

    /// Board columns
    #[arg(long, default_value_t = 6)]
    cols: u32,

    /// Board rows
    #[arg(long, default_value_t = 3)]
    rows: u32,

    /// Starting coin balance
    #[arg(long, default_value_t = 1500)]
    coins: u32,

    /// Starting gem balance
    #[arg(long, default_value_t = 20)]
    gems: u32,

    /// Session stats output file
    #[arg(long, default_value = "summon_session.json")]
    output: PathBuf,
}

#[derive(Debug, Default, Serialize)]
struct SessionStats {
    summoned_by_grade: [u32; Grade::COUNT],
    normal_successes: u32,
    lucky_successes: u32,
    lucky_misses: u32,
    roster_full_failures: u32,
    coin_failures: u32,
    gem_failures: u32,
    no_cell_failures: u32,
    final_probability_level: u32,
    final_coins: u32,
    final_gems: u32,
    coin_procs_fired: u32,
    gem_procs_fired: u32,
}

/// Stand-in enemy: owns the proc decision for incoming slows
#[derive(Debug)]
struct DummyEnemy {
    rng: ChaCha8Rng,
    slows_applied: u32,
}

impl DummyEnemy {
    fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            slows_applied: 0,
        }
    }

    fn roll(&mut self) -> Percent {
        self.rng.gen::<f32>() * 100.0
    }
}

impl SpeedDebuffTarget for DummyEnemy {
    fn apply_speed_reduction(&mut self, amount: f32, duration: f32, chance: Percent) {
        if self.roll() <= chance {
            self.slows_applied += 1;
            tracing::debug!("enemy slowed by {} for {}s", amount, duration);
        }
    }

    fn apply_speed_reduction_rate(&mut self, rate: f32, duration: f32, chance: Percent) {
        if self.roll() <= chance {
            self.slows_applied += 1;
            tracing::debug!("enemy slowed by {}% for {}s", rate, duration);
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "lucky_bastion=info,summon_sim=info".into()),
        )
        .init();

    let args = Args::parse();

    println!("Lucky Bastion summon session");
    println!("============================");
    println!("Data: {}", args.data.display());
    println!("Board: {}x{} cells, seed {}", args.cols, args.rows, args.seed);
    println!();

    let data = match load_game_data(&args.data) {
        Ok(data) => data,
        Err(err) => {
            eprintln!("Failed to load game data: {}", err);
            std::process::exit(1);
        }
    };

    let skills = SkillBook::compile(&data.skills).expect("skills validated at load");
    let ladder = EnforcementLadder::new(data.ladder_tables.clone()).expect("ladder validated at load");
    let ledger = InGameLedger::new(
        args.coins,
        args.gems,
        data.config.initial_summon_coin_cost,
        data.config.summon_coin_cost_step,
    );

    // Raw geometry handed over unordered; the board sorts it
    let positions = (0..args.rows).flat_map(|row| {
        (0..args.cols).map(move |col| CellPos::new(col as f32, row as f32))
    });

    let mut summoner = Summoner::new(
        data.config.clone(),
        data.catalog,
        ladder,
        positions,
        ledger,
        TracingSink,
    )
    .expect("config validated at load");

    let mut dice = StandardDice::new(ChaCha8Rng::seed_from_u64(args.seed));
    let mut stats = SessionStats::default();

    for _ in 0..args.enforce {
        if summoner.ladder().is_maxed() {
            break;
        }
        if summoner.enforce_probability().is_err() {
            break;
        }
    }

    for _ in 0..args.summons {
        match summoner.summon(SummonRequest::normal(), &mut dice) {
            Ok(outcome) => {
                stats.normal_successes += 1;
                stats.summoned_by_grade[outcome.grade.index()] += 1;
            }
            Err(SummonError::RosterFull) => stats.roster_full_failures += 1,
            Err(SummonError::NotEnoughCoins) => stats.coin_failures += 1,
            Err(SummonError::NoCellAvailable) => stats.no_cell_failures += 1,
            Err(err) => tracing::warn!("normal summon failed: {}", err),
        }
    }

    let config = summoner.config().clone();
    for offer in [
        LuckyOffer::rare(&config),
        LuckyOffer::heroic(&config),
        LuckyOffer::legendary(&config),
    ] {
        for _ in 0..args.lucky {
            match summoner.summon(SummonRequest::lucky(offer), &mut dice) {
                Ok(outcome) => {
                    stats.lucky_successes += 1;
                    stats.summoned_by_grade[outcome.grade.index()] += 1;
                }
                Err(SummonError::LuckyMiss) => stats.lucky_misses += 1,
                Err(SummonError::NotEnoughGems) => stats.gem_failures += 1,
                Err(SummonError::RosterFull) => stats.roster_full_failures += 1,
                Err(SummonError::NoCellAvailable) => stats.no_cell_failures += 1,
                Err(err) => tracing::warn!("lucky summon failed: {}", err),
            }
        }
    }

    // Exercise the compiled passive skills of everything on the board
    let mut enemy = DummyEnemy::new(args.seed ^ 0x5eed);
    let skilled: Vec<_> = summoner
        .pool()
        .iter_active()
        .filter_map(|(_, unit)| unit.skill)
        .collect();
    for skill_id in skilled {
        if let Some(proc) = skills.resource_proc(skill_id) {
            for _ in 0..10 {
                if skills.fire_resource_proc(skill_id, &mut dice, summoner.ledger_mut())
                    == Some(true)
                {
                    match proc.resource {
                        lucky_bastion::economy::ResourceKind::Coin => stats.coin_procs_fired += 1,
                        lucky_bastion::economy::ResourceKind::Gem => stats.gem_procs_fired += 1,
                    }
                }
            }
        } else if skills.target_proc(skill_id).is_some() {
            skills.fire_target_proc(skill_id, &mut enemy);
        }
    }

    stats.final_probability_level = summoner.ladder().level();
    stats.final_coins = summoner.ledger().coins();
    stats.final_gems = summoner.ledger().gems();

    println!();
    println!("--- Session Summary ---");
    println!(
        "Roster: {}/{} units",
        summoner.active_count(),
        summoner.config().max_roster
    );
    for grade in Grade::ALL {
        println!("  {}: {}", grade, stats.summoned_by_grade[grade.index()]);
    }
    println!(
        "Normal: {} placed | Lucky: {} hits, {} misses",
        stats.normal_successes, stats.lucky_successes, stats.lucky_misses
    );
    println!(
        "Failures: {} roster-full, {} coins, {} gems, {} no-cell",
        stats.roster_full_failures, stats.coin_failures, stats.gem_failures, stats.no_cell_failures
    );
    println!(
        "Probability level {}/{}, next summon costs {} coins",
        summoner.ladder().level(),
        summoner.ladder().max_level(),
        summoner.ledger().summon_coin_cost()
    );
    println!(
        "Balances: {} coins, {} gems | procs: {} coin, {} gem | enemy slows: {}",
        stats.final_coins, stats.final_gems, stats.coin_procs_fired, stats.gem_procs_fired,
        enemy.slows_applied
    );

    let json = serde_json::to_string_pretty(&stats).expect("stats serialize");
    std::fs::write(&args.output, &json).expect("failed to write session output");
    println!("\nFull stats written to {}", args.output.display());
}
