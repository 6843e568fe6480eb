use crate::errors::MethodError;
use crate::methods::{PathParams, WriteFileParams};
use serde_json::{Value, json};

/// Reads a whole file as UTF-8 text. Invalid sequences become U+FFFD.
pub async fn read_file(params: &PathParams) -> Result<Value, MethodError> {
    let bytes = tokio::fs::read(&params.path)
        .await
        .map_err(|e| MethodError::io(&params.path, e))?;

    Ok(Value::String(String::from_utf8_lossy(&bytes).into_owned()))
}

/// Creates or truncates the file, then writes `content` to it.
pub async fn write_file(params: &WriteFileParams) -> Result<Value, MethodError> {
    tokio::fs::write(&params.path, params.content.as_bytes())
        .await
        .map_err(|e| MethodError::io(&params.path, e))?;

    Ok(json!("ok"))
}

/// Entry names of a directory, sorted so repeated calls return the same sequence.
pub async fn list_dir(params: &PathParams) -> Result<Value, MethodError> {
    let mut entries = tokio::fs::read_dir(&params.path)
        .await
        .map_err(|e| MethodError::io(&params.path, e))?;

    let mut names = Vec::new();
    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| MethodError::io(&params.path, e))?
    {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();

    Ok(json!(names))
}
