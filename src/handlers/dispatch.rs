use crate::models::Route;

pub const EXIT_COMMAND: &str = "exit";
pub const NEWS_KEYWORD: &str = "news";

/// Decides what to do with one line read from the terminal.
///
/// Only the line terminator is stripped; everything else is forwarded as typed.
pub fn route(line: &str) -> Route {
    let input = line.trim_end_matches(['\r', '\n']);
    if input.eq_ignore_ascii_case(EXIT_COMMAND) {
        return Route::Exit;
    }
    if input.to_lowercase().contains(NEWS_KEYWORD) {
        Route::News(input.to_string())
    } else {
        Route::Chat(input.to_string())
    }
}
