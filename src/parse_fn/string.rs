// Helper functions for text-valued tags

pub fn string(value: &str) -> String {
    value.to_owned()
}

/// First character of a reference tag (`N`, `S`, `E`, `W`), `None` when empty.
pub fn first_char(value: &str) -> Option<char> {
    value.chars().next()
}
