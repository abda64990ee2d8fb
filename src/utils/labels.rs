/// Turn a category code such as `ANNUAL_LEAVE` into `Annual Leave`.
///
/// Each underscore becomes one space, everything is lower-cased and the
/// first letter of each whitespace-separated word is upper-cased. Input
/// casing does not matter.
pub fn format_category_label(code: &str) -> String {
    let mut label = String::with_capacity(code.len());
    let mut word_start = true;

    for c in code.replace('_', " ").to_lowercase().chars() {
        if c.is_whitespace() {
            word_start = true;
            label.push(c);
        } else if word_start {
            word_start = false;
            label.extend(c.to_uppercase());
        } else {
            label.push(c);
        }
    }

    label
}
