use std::path::Path;
use std::sync::RwLock;

use actix_cors::Cors;
use actix_web::{get, middleware, put, web, App, HttpResponse, HttpServer, Responder};
use log::{info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use wordgen_core::io::{list_files, sample_name};
use wordgen_core::{GenerationInput, Generator, MarkovModel, ModelError, ModelSummary, StartState};

/// Folder holding the `.txt` samples.
const DATA_FOLDER: &str = "./data";

/// Sample loaded at startup, if present.
const DEFAULT_SAMPLE: &str = "sample";

/// Struct representing query parameters for the `/v1/generate` endpoint
#[derive(Deserialize)]
struct GenerateParams {
	sentences: Option<usize>,
	seed: Option<u64>,
	max_tokens: Option<usize>,
	start: Option<String> // -> random, custom(window) or none
}

#[derive(Deserialize)]
struct SampleQuery {
	name: Option<String>,
	memory: Option<usize>
}

#[derive(Serialize)]
struct LoadedModel<'a> {
	sample: &'a str,
	summary: ModelSummary
}

struct LoadedSample {
	name: String,
	model: MarkovModel
}

struct SharedData {
	sample: Option<LoadedSample>
}

impl GenerateParams {
	/// Determines the starting window strategy.
	fn start_state(&self) -> Result<StartState, String> {
		match &self.start {
			None => Ok(StartState::Random),
			Some(s) if s.to_lowercase() == "none" || s.to_lowercase() == "random" => Ok(StartState::Random),
			Some(s) if s.to_lowercase().starts_with("custom:") => {
				let value = s["custom:".len()..].trim();
				if value.is_empty() {
					Err("Custom start cannot be empty".into())
				} else {
					Ok(StartState::Custom(value.split_whitespace().collect::<Vec<_>>().join(" ")))
				}
			}
			Some(_) => Err("Start must start with 'custom:' or be 'random' or 'none'".into()),
		}
	}

	/// Builds the generation input from the query, with defaults.
	fn generation_input(&self) -> Result<GenerationInput, String> {
		let mut input = GenerationInput::new(self.sentences.unwrap_or(1)).map_err(|e| e.to_string())?;
		if let Some(max_tokens) = self.max_tokens {
			input.set_max_tokens(max_tokens)?;
		}
		Ok(input.with_start(self.start_state()?))
	}
}

/// Maps a model error onto the matching HTTP response.
fn error_response(error: ModelError) -> HttpResponse {
	match error {
		ModelError::StateLookup { .. } | ModelError::InvalidSentenceCount => {
			HttpResponse::BadRequest().body(error.to_string())
		}
		ModelError::InsufficientSample { .. } | ModelError::InvalidMemory => {
			HttpResponse::UnprocessableEntity().body(error.to_string())
		}
		_ => HttpResponse::InternalServerError().body(error.to_string()),
	}
}

fn load_sample(name: &str, memory: usize) -> Result<LoadedSample, ModelError> {
	let path = Path::new(DATA_FOLDER).join(format!("{name}.txt"));
	let model = MarkovModel::from_file(&path, memory)?;
	info!("loaded sample '{}' with memory {}: {} states", name, memory, model.states().len());
	Ok(LoadedSample { name: name.to_owned(), model })
}

/// HTTP GET endpoint `/v1/generate`
///
/// Generates sentences from the loaded sample based on query parameters.
/// Returns the generated text as the response body.
#[get("/v1/generate")]
async fn get_generated(data: web::Data<RwLock<SharedData>>, query: web::Query<GenerateParams>) -> impl Responder {
	let input = match query.generation_input() {
		Ok(input) => input,
		Err(e) => return HttpResponse::BadRequest().body(e)
	};

	let mut rng = match query.seed {
		Some(seed) => SmallRng::seed_from_u64(seed),
		None => SmallRng::from_rng(&mut rand::rng()),
	};

	let shared_data = match data.read() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	let sample = match &shared_data.sample {
		Some(sample) => sample,
		None => return HttpResponse::Conflict().body("No sample loaded"),
	};

	match Generator::new(&sample.model).generate(&input, &mut rng) {
		Ok(result) => HttpResponse::Ok().body(result),
		Err(e) => {
			warn!("generation from '{}' failed: {}", sample.name, e);
			error_response(e)
		}
	}
}

#[get("/v1/samples")]
async fn get_samples() -> impl Responder {
	match list_files(DATA_FOLDER, "txt") {
		Ok(files) => HttpResponse::Ok().body(files.iter().filter_map(sample_name).collect::<Vec<_>>().join("\n")),
		Err(_) => HttpResponse::InternalServerError().body("Failed to list samples")
	}
}

#[get("/v1/model")]
async fn get_model(data: web::Data<RwLock<SharedData>>) -> impl Responder {
	let shared_data = match data.read() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	match &shared_data.sample {
		Some(sample) => HttpResponse::Ok().json(LoadedModel { sample: &sample.name, summary: sample.model.summary() }),
		None => HttpResponse::Conflict().body("No sample loaded"),
	}
}

#[put("/v1/load_sample")]
async fn put_sample(data: web::Data<RwLock<SharedData>>, query: web::Query<SampleQuery>) -> impl Responder {
	let name = match &query.name {
		Some(s) if !s.trim().is_empty() => s.trim(),
		_ => return HttpResponse::BadRequest().body("Missing or empty sample name"),
	};
	if name.contains(['/', '\\']) || name.starts_with('.') {
		return HttpResponse::BadRequest().body("Invalid sample name");
	}
	let memory = query.memory.unwrap_or(1);

	// Build outside the lock, generations keep running on the previous model meanwhile
	let sample = match load_sample(name, memory) {
		Ok(sample) => sample,
		Err(ModelError::Io(e)) => return HttpResponse::NotFound().body(format!("Failed to load sample: {e}")),
		Err(e) => return error_response(e),
	};

	let mut shared_data = match data.write() {
		Ok(d) => d,
		Err(_) => return HttpResponse::InternalServerError().body("Model lock failed"),
	};
	shared_data.sample = Some(sample);

	HttpResponse::Ok().body("Sample loaded successfully")
}

/// Main entry point for the server.
///
/// Loads the default sample when available, shares the read-only model
/// behind a `RwLock` and starts an Actix-web HTTP server.
///
/// # Notes
/// - The server binds to 127.0.0.1:5000.
/// - Samples are read from `./data/<name>.txt`.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
	env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

	let sample = match load_sample(DEFAULT_SAMPLE, 1) {
		Ok(sample) => Some(sample),
		Err(e) => {
			warn!("no default sample: {e}");
			None
		}
	};
	let shared_data = web::Data::new(RwLock::new(SharedData { sample }));

	HttpServer::new(move || {
		App::new()
			.wrap(middleware::Logger::default())
			.wrap(Cors::permissive())
			.app_data(shared_data.clone())
			.service(get_generated)
			.service(get_samples)
			.service(get_model)
			.service(put_sample)
	})
		.bind(("127.0.0.1", 5000))?
		.run()
		.await
}

#[cfg(test)]
mod tests {
	use super::*;

	fn params(start: Option<&str>) -> GenerateParams {
		GenerateParams { sentences: None, seed: None, max_tokens: None, start: start.map(str::to_owned) }
	}

	#[test]
	fn start_strategies() {
		assert_eq!(params(None).start_state(), Ok(StartState::Random));
		assert_eq!(params(Some("Random")).start_state(), Ok(StartState::Random));
		assert_eq!(
			params(Some("custom:the  old")).start_state(),
			Ok(StartState::Custom("the old".to_owned()))
		);
		assert!(params(Some("custom: ")).start_state().is_err());
		assert!(params(Some("first")).start_state().is_err());
	}

	#[test]
	fn generation_defaults() {
		let input = params(None).generation_input().unwrap();
		assert_eq!(input.sentences(), 1);
		assert_eq!(input.start_state, StartState::Random);
	}

	#[test]
	fn invalid_counts_are_rejected() {
		let mut query = params(None);
		query.sentences = Some(0);
		assert!(query.generation_input().is_err());

		let mut query = params(None);
		query.max_tokens = Some(0);
		assert!(query.generation_input().is_err());
	}
}
