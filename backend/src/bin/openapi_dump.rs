//! Print the OpenAPI document as JSON.

use std::io::{self, Write};

use storefront::ApiDoc;
use utoipa::OpenApi;

fn main() -> color_eyre::Result<()> {
    let json = ApiDoc::openapi().to_pretty_json()?;
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{json}")?;
    Ok(())
}
