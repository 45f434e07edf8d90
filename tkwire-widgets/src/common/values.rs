// tkwire-widgets/src/common/values.rs

/// Position of `value` in `data`
pub fn index_of_value(data: &[String], value: &str) -> Option<usize> {
    data.iter().position(|item| item == value)
}

/// Replace the first decimal comma with a dot ("3,5" -> "3.5")
pub fn dot_decimal(text: &str) -> String {
    text.replacen(',', ".", 1)
}

/// First element of a list-shaped result, e.g. a multi-item selection
pub(crate) fn first_item(result: &str) -> Option<String> {
    tkwire_core::parse_list(result)
        .ok()
        .and_then(|items| items.into_iter().next())
}
