mod invalid_json;
mod notes;
