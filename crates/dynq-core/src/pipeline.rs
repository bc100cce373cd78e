//! Parse, fetch, render.

use std::io::Write;

use tracing::{debug, warn};

use crate::client::ItemClient;
use crate::config::QueryConfig;
use crate::error::{DynqError, DynqResult};
use crate::parser::{self, QuerySource};
use crate::render::{self, ExitStatus, Rendered, Stream};

/// One point read from key expression to printed result.
///
/// Holds the client only; every call to [`QueryPipeline::run`] is
/// independent of the previous one.
#[derive(Debug)]
pub struct QueryPipeline<C> {
    client: C,
}

impl<C: ItemClient> QueryPipeline<C> {
    /// Create a pipeline over a store client.
    #[must_use]
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Produce the rendered result without writing it.
    ///
    /// Usage errors are returned before the client is called.
    ///
    /// # Errors
    /// [`DynqError::Parse`] for a missing, conflicting or malformed key
    /// expression, [`DynqError::Client`] if the lookup itself failed.
    pub async fn execute(&self, config: &QueryConfig) -> DynqResult<Rendered> {
        let source = QuerySource::from_flags(config.key_value.as_deref(), config.query.as_deref())?;
        let key = parser::parse(&source)?;

        debug!(table = %config.table_name, key = %key, "issuing point read");
        let result = self.client.get_item(&config.table_name, &key).await?;

        Ok(render::render(&result, &key, config.render_mode))
    }

    /// Run the pipeline and write the outcome to `stdout` or `stderr`.
    ///
    /// Errors are reported as a single line on `stderr`.
    pub async fn run<O: Write, E: Write>(
        &self,
        config: &QueryConfig,
        stdout: &mut O,
        stderr: &mut E,
    ) -> ExitStatus {
        let outcome = match self.execute(config).await {
            Ok(rendered) => write_rendered(&rendered, stdout, stderr).map(|()| rendered.exit_status),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(status) => status,
            Err(e) => {
                let status = e.exit_status();
                if let Err(io) = report(&e, stderr) {
                    warn!(error = %io, "failed to report error");
                }
                status
            }
        }
    }
}

fn write_rendered<O: Write, E: Write>(
    rendered: &Rendered,
    stdout: &mut O,
    stderr: &mut E,
) -> DynqResult<()> {
    match rendered.stream {
        Stream::Stdout => {
            stdout.write_all(rendered.output.as_bytes())?;
            stdout.flush()?;
        }
        Stream::Stderr => {
            stderr.write_all(rendered.output.as_bytes())?;
            stderr.flush()?;
        }
    }
    Ok(())
}

fn report<E: Write>(error: &DynqError, stderr: &mut E) -> std::io::Result<()> {
    writeln!(stderr, "Error: {error}")?;
    stderr.flush()
}
