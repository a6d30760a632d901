const BEARER: &str = "Bearer ";
const HIDDEN: &str = "[hidden]";

/// Scrub bearer credentials out of an error message before it is logged
/// or stored in history.
pub fn sanitize_error(error: &str, credential: &str) -> String {
    let mut sanitized = error.to_string();

    // Replace the literal credential wherever it was echoed back
    if !credential.is_empty() {
        sanitized = sanitized.replace(credential, HIDDEN);
    }

    // Also hide any other "Bearer <token>" the service may have echoed
    let mut search_from = 0;
    while let Some(found) = sanitized[search_from..].find(BEARER) {
        let token_start = search_from + found + BEARER.len();
        let after = &sanitized[token_start..];
        let end_offset = after
            .find(|c: char| c.is_whitespace() || c == '"' || c == '\'' || c == ',' || c == ';')
            .unwrap_or(after.len());
        let token = &after[..end_offset];
        if token.is_empty() || token == HIDDEN {
            search_from = token_start + token.len();
            continue;
        }
        sanitized = format!(
            "{}{}{}",
            &sanitized[..token_start],
            HIDDEN,
            &after[end_offset..]
        );
        search_from = token_start + HIDDEN.len();
    }

    sanitized
}
