use crate::errors::MethodError;
use crate::methods::CypherParams;
use database::{GraphStore, run_in_session, sanitize_cypher};
use serde_json::{Value, json};
use tracing::info;

/// Runs a single Cypher statement. Transaction keywords and separators are
/// stripped first, and the session is released whatever the outcome.
pub async fn save_to_neo4j(
    store: &dyn GraphStore,
    params: &CypherParams,
) -> Result<Value, MethodError> {
    let cypher = sanitize_cypher(&params.cypher);
    info!("Sending Cypher: {}", cypher);

    let summary = run_in_session(store, &cypher).await?;

    Ok(json!({ "summary": summary }))
}
