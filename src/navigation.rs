//! Navigator trees used by the application

use app_ui::navigation::{NavigatorNode, NavigatorOptions, NavigatorType, ScreenDescriptor, ScreenOptions};

/// Component key of the task list screen
pub const TASK_LIST_SCREEN: &str = "TaskListScreen";
/// Component key of the login screen
pub const LOGIN_SCREEN: &str = "LoginScreen";
/// Component key of the registration screen
pub const REGISTER_SCREEN: &str = "RegisterScreen";
/// Component key of the password recovery screen
pub const FORGOT_PASSWORD_SCREEN: &str = "ForgotPasswordScreen";

/// Root tree: a header-less stack around the task list
pub fn task_planner_navigation() -> NavigatorNode {
    NavigatorNode::new(NavigatorType::Stack, "Root", "TaskList")
        .options(NavigatorOptions {
            header_shown: Some(false),
            ..NavigatorOptions::default()
        })
        .screen(
            ScreenDescriptor::new("TaskList", TASK_LIST_SCREEN)
                .options(ScreenOptions::titled("Task Planner"))
                .icon("list"),
        )
}

/// Authentication flow: login with registration and password recovery
pub fn auth_navigation() -> NavigatorNode {
    NavigatorNode::new(NavigatorType::Stack, "Auth", "Login")
        .options(NavigatorOptions {
            header_shown: Some(false),
            ..NavigatorOptions::default()
        })
        .screen(ScreenDescriptor::new("Login", LOGIN_SCREEN).options(ScreenOptions::titled("Login")))
        .screen(ScreenDescriptor::new("Register", REGISTER_SCREEN).options(ScreenOptions::titled("Register")))
        .screen(
            ScreenDescriptor::new("ForgotPassword", FORGOT_PASSWORD_SCREEN)
                .options(ScreenOptions::titled("Forgot Password")),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use app_ui::navigation::RouteConfig;

    #[test]
    fn test_root_tree_shape() {
        let root = task_planner_navigation();
        assert_eq!(root.navigator_type().unwrap(), NavigatorType::Stack);
        assert_eq!(root.initial_route_name, "TaskList");
        assert_eq!(root.options.header_shown, Some(false));

        match root.child("TaskList") {
            Some(RouteConfig::Screen(screen)) => {
                assert_eq!(screen.component, TASK_LIST_SCREEN);
                assert_eq!(screen.options.title.as_deref(), Some("Task Planner"));
            }
            other => panic!("unexpected child: {:?}", other),
        }
    }

    #[test]
    fn test_auth_tree_order() {
        let auth = auth_navigation();
        let names: Vec<&str> = auth.children.iter().map(RouteConfig::name).collect();
        assert_eq!(names, ["Login", "Register", "ForgotPassword"]);
        assert_eq!(auth.initial_route_name, "Login");
        assert_eq!(auth.options.header_shown, Some(false));

        let titles: Vec<Option<&str>> = auth
            .children
            .iter()
            .map(|child| match child {
                RouteConfig::Screen(screen) => screen.options.title.as_deref(),
                RouteConfig::Navigator(_) => None,
            })
            .collect();
        assert_eq!(titles, [Some("Login"), Some("Register"), Some("Forgot Password")]);
    }

    #[test]
    fn test_root_tree_round_trips_through_json() {
        let json = serde_json::to_string(&task_planner_navigation()).unwrap();
        assert!(json.contains(r#""type":"stack""#));
        let parsed: NavigatorNode = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, task_planner_navigation());
    }
}
