use std::env;
use std::thread::{self, ScopedJoinHandle};

use log::info;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use wordgen_core::{GenerationInput, Generator, MarkovModel, StartState};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    // Usage: wordgen-exemple [sample path] [memory] [sentences] [seed]
    let args: Vec<String> = env::args().skip(1).collect();
    let sample = args.first().map(String::as_str).unwrap_or("./data/sample.txt");
    let memory: usize = args.get(1).map(|s| s.parse::<usize>()).transpose()?.unwrap_or(1);
    let sentences: usize = args.get(2).map(|s| s.parse::<usize>()).transpose()?.unwrap_or(3);
    let seed: u64 = match args.get(3) {
        Some(s) => s.parse::<u64>()?,
        None => rand::rng().random(),
    };

    // Build the model once, it is read-only from now on
    let model = MarkovModel::from_file(sample, memory)?;
    let summary = model.summary();
    info!("model built from {sample} with seed {seed}");
    println!(
        "{} words, {} states ({} initial, {} without continuation), memory {}",
        summary.vocabulary_size,
        summary.state_count,
        summary.initial_state_count,
        summary.dead_state_count,
        summary.memory
    );

    // Same seed, same text
    let mut rng = SmallRng::seed_from_u64(seed);
    println!("\n{}", model.generate(sentences, &mut rng)?);

    // One sentence per line, starting from the first initial state
    if let Some(first) = model.initial_state_names().next() {
        let input = GenerationInput::new(sentences)?.with_start(StartState::Custom(first.to_owned()));
        println!("\nStarting after '{first}':");
        for sentence in Generator::new(&model).sentences(&input, &mut rng)? {
            println!("- {sentence}");
        }
    }

    // A shared model can feed several threads, each one with its own random source
    let workers = num_cpus::get();
    let texts = thread::scope(|scope| {
        let handles: Vec<_> = (0..workers as u64)
            .map(|worker| {
                let model = &model;
                scope.spawn(move || {
                    let mut rng = SmallRng::seed_from_u64(seed.wrapping_add(worker + 1));
                    model.generate(1, &mut rng)
                })
            })
            .collect();
        join_all(handles)
    })?;

    println!("\n{} sentences generated on {} threads:", texts.len(), workers);
    for (i, text) in texts.iter().enumerate() {
        println!("Generated sentence {}: {}", i + 1, text);
    }

    Ok(())
}

/// Waits for every generation thread, turning a panic into an error.
fn join_all(
    handles: Vec<ScopedJoinHandle<'_, wordgen_core::Result<String>>>,
) -> Result<Vec<String>, Box<dyn std::error::Error>> {
    handles
        .into_iter()
        .map(|handle| -> Result<String, Box<dyn std::error::Error>> {
            match handle.join() {
                Ok(text) => Ok(text?),
                Err(_) => Err("generation thread panicked".into()),
            }
        })
        .collect()
}
