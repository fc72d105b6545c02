// Copyright 2025 JiangLong.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! String and collection helpers shared by the command layer

/// Replaces `_` and `-` with spaces, then capitalizes the first letter of each word.
///
/// `"rag-dev_template"` becomes `"Rag Dev Template"`.
pub fn capitalize_and_format(s: &str) -> String {
    s.replace(['_', '-'], " ")
        .split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Flattens a list of lists into one list, keeping order.
pub fn flatten<T>(rows: Vec<Vec<T>>) -> Vec<T> {
    rows.into_iter().flatten().collect()
}

/// Parse `key=value` items (the `-D` flag) into a map. Later keys win.
pub fn parse_key_value_items(
    items: &[String],
) -> std::result::Result<std::collections::HashMap<String, String>, String> {
    let mut map = std::collections::HashMap::new();

    for item in items {
        let parts: Vec<&str> = item.splitn(2, '=').collect();
        if parts.len() != 2 {
            return Err(format!(
                "Invalid config format: '{}'. Expected 'key=value'",
                item
            ));
        }

        let key = parts[0].trim();
        let value = parts[1].trim();

        if key.is_empty() {
            return Err(format!("Empty key in config: '{}'", item));
        }

        map.insert(key.to_string(), value.to_string());
    }

    Ok(map)
}
