/// The five navigable destinations. Anything else falls through to the
/// 404 view, which keeps the path it was asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Landing,
    Dashboard,
    Todos,
    Diary,
    NotFound(String),
}

impl Route {
    /// Exact match on the known paths, tolerating one trailing slash
    /// (`/todos/` routes like `/todos`). No other normalization.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim();
        let canonical = if trimmed.len() > 1 {
            trimmed.strip_suffix('/').unwrap_or(trimmed)
        } else {
            trimmed
        };
        match canonical {
            "/" => Route::Landing,
            "/dashboard" => Route::Dashboard,
            "/todos" => Route::Todos,
            "/diary" => Route::Diary,
            _ => Route::NotFound(trimmed.to_string()),
        }
    }

    pub fn path(&self) -> &str {
        match self {
            Route::Landing => "/",
            Route::Dashboard => "/dashboard",
            Route::Todos => "/todos",
            Route::Diary => "/diary",
            Route::NotFound(path) => path,
        }
    }
}
