use crate::Error;
use serde::Serialize;
use std::str::FromStr;

pub const CREATE_CONTROLLER: &str = "content_edit:createWithoutDraftAction";
pub const EDIT_CONTROLLER: &str = "content_edit:editVersionDraftAction";

/// Parameter key under which the controller identifier travels.
pub const CONTROLLER_KEY: &str = "_controller";

/// The screens this crate builds views for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    ContentCreate,
    ContentEdit,
}

impl Route {
    pub fn controller(&self) -> &'static str {
        match self {
            Route::ContentCreate => CREATE_CONTROLLER,
            Route::ContentEdit => EDIT_CONTROLLER,
        }
    }

    pub fn from_controller(controller: &str) -> Option<Self> {
        match controller {
            CREATE_CONTROLLER => Some(Route::ContentCreate),
            EDIT_CONTROLLER => Some(Route::ContentEdit),
            _ => None,
        }
    }
}

impl FromStr for Route {
    type Err = Error;

    /// Accepts the short names `create`/`edit` or a controller identifier.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "create" => Ok(Route::ContentCreate),
            "edit" => Ok(Route::ContentEdit),
            other => Route::from_controller(other).ok_or_else(|| Error::UnknownRoute(other.into())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_round_trip() {
        for route in [Route::ContentCreate, Route::ContentEdit] {
            assert_eq!(Route::from_controller(route.controller()), Some(route));
        }
        assert_eq!(Route::from_controller("content_edit:deleteAction"), None);
    }

    #[test]
    fn parses_short_names_and_rejects_unknown() {
        assert_eq!("edit".parse::<Route>().unwrap(), Route::ContentEdit);
        assert_eq!(CREATE_CONTROLLER.parse::<Route>().unwrap(), Route::ContentCreate);
        assert!(matches!("view".parse::<Route>(), Err(Error::UnknownRoute(r)) if r == "view"));
    }
}
