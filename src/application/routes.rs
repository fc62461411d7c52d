//! Route table of the desk: the user-visible paths.

use std::fmt;

use blogdesk_api_types::PostId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    List,
    Detail(PostId),
    Create,
    Edit(PostId),
    Search,
}

impl Route {
    pub fn path(&self) -> String {
        match self {
            Route::List => "/".to_string(),
            Route::Detail(id) => format!("/posts/{id}"),
            Route::Create => "/create".to_string(),
            Route::Edit(id) => format!("/edit/{id}"),
            Route::Search => "/search".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
