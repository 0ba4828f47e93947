//! Generate the Swagger document of a small demo service and print it or write it to a file.

use std::{env, io, path::PathBuf};

use anyhow::Context;
use contract_swagger::{
    GeneratorConfig, SwaggerGenerator,
    contract::{Contract, FieldDescriptor, Record, RestSelector, RpcSelector, Service},
    describe_record,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Environment variable naming the output file when no argument is given.
const OUTPUT_ENV: &str = "SWAGGER_OUTPUT";

fn main() -> anyhow::Result<()> {
    init_tracing();

    let generator = SwaggerGenerator::from_config(GeneratorConfig::load());
    let services = demo_services();

    match output_path() {
        Some(path) => {
            generator
                .write_to_file(&path, &services)
                .with_context(|| format!("writing {}", path.display()))?;
            info!(path = %path.display(), "document written");
        }
        None => generator
            .write_to(io::stdout().lock(), &services)
            .context("writing to stdout")?,
    }

    Ok(())
}

/// Output file from the first argument, then from [`OUTPUT_ENV`].
fn output_path() -> Option<PathBuf> {
    env::args_os()
        .nth(1)
        .or_else(|| env::var_os(OUTPUT_ENV))
        .map(PathBuf::from)
        .filter(|path| !path.as_os_str().is_empty())
}

/// Configure tracing on stderr so stdout only carries the document.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

struct GetNoteRequest;
struct CreateNoteRequest;
struct Note;
struct Author;
struct NoteError;

impl Record for GetNoteRequest {
    fn type_name() -> &'static str {
        "GetNoteRequest"
    }

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::of::<String>("notebook").tag("json", "notebook"),
            FieldDescriptor::of::<u64>("id").tag("json", "id"),
            FieldDescriptor::of::<Option<bool>>("with_author").tag("json", "withAuthor,omitempty"),
        ]
    }
}

impl Record for CreateNoteRequest {
    fn type_name() -> &'static str {
        "CreateNoteRequest"
    }

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::of::<String>("notebook").tag("json", "notebook"),
            FieldDescriptor::of::<String>("title").tag("json", "title"),
            FieldDescriptor::of::<Vec<String>>("labels").tag("json", "labels,omitempty"),
        ]
    }
}

impl Record for Note {
    fn type_name() -> &'static str {
        "Note"
    }

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::of::<u64>("id").tag("json", "id"),
            FieldDescriptor::of::<String>("title").tag("json", "title"),
            FieldDescriptor::of::<Author>("author").tag("json", "author"),
            FieldDescriptor::of::<Vec<String>>("labels").tag("json", "labels"),
            FieldDescriptor::of::<Vec<u8>>("attachment").tag("json", "attachment,omitempty"),
            FieldDescriptor::of::<serde_json::Value>("extra").tag("json", "extra"),
        ]
    }
}

impl Record for Author {
    fn type_name() -> &'static str {
        "Author"
    }

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::of::<String>("name").tag("json", "name"),
            FieldDescriptor::of::<f64>("reputation").tag("json", "reputation"),
        ]
    }
}

impl Record for NoteError {
    fn type_name() -> &'static str {
        "NoteError"
    }

    fn fields() -> Vec<FieldDescriptor> {
        vec![
            FieldDescriptor::of::<i32>("code").tag("json", "code"),
            FieldDescriptor::of::<String>("description").tag("json", "description"),
        ]
    }
}

describe_record!(Author);

fn demo_services() -> Vec<Service> {
    vec![
        Service::new("notes")
            .add_contract(
                Contract::new("getNote")
                    .with_input::<GetNoteRequest>()
                    .with_output::<Note>()
                    .add_selector(RestSelector::get("/notebooks/:notebook/notes/:id"))
                    .add_selector(RpcSelector::new("notes.get"))
                    .add_possible_error::<NoteError>(404, "NOTEBOOK")
                    .add_possible_error::<NoteError>(404, "NOTE"),
            )
            .add_contract(
                Contract::new("createNote")
                    .with_input::<CreateNoteRequest>()
                    .with_output::<Note>()
                    .add_selector(RestSelector::post("/notebooks/:notebook/notes"))
                    .add_possible_error::<NoteError>(400, "TITLE")
                    .add_possible_error::<NoteError>(503, "STORAGE"),
            ),
    ]
}
