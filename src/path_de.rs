use serde::de::DeserializeOwned;

use crate::error::PathedError;

/// Deserialize with JSON-path context in error messages.
pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, PathedError> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    let value = match serde_path_to_error::deserialize::<_, T>(&mut *de) {
        Ok(v) => v,
        Err(err) => {
            let path = err.path().to_string();
            return Err(PathedError { path, message: err.into_inner().to_string() });
        }
    };
    // trailing garbage after the document
    de.end().map_err(|err| PathedError { path: ".".into(), message: err.to_string() })?;
    Ok(value)
}

/// Best-effort lookup of the `name` of the record a failing path points into,
/// e.g. `utility_functions[3].arguments[0].type` → the name of function 3.
pub fn record_name_at(bytes: &[u8], path: &str) -> Option<String> {
    let (section, index) = leading_record(path)?;
    let doc = serde_json::from_slice::<serde_json::Value>(bytes).ok()?;
    doc.get(section)?
        .get(index)?
        .get("name")?
        .as_str()
        .map(str::to_owned)
}

// "section[index]..." → (section, index)
fn leading_record(path: &str) -> Option<(&str, usize)> {
    let open = path.find('[')?;
    let close = open + path[open..].find(']')?;
    let section = &path[..open];
    if section.is_empty() || section.contains('.') {
        return None;
    }
    let index = path[open + 1..close].parse().ok()?;
    Some((section, index))
}
