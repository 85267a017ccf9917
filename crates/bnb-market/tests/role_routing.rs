use std::sync::{Arc, Mutex};
use std::time::Duration;

use bnb_market::marketplace::session::{
    logout, Destination, Navigator, ProfileView, RoleRouter, Transition, User,
};

#[derive(Default)]
struct ScreenStack {
    current: Mutex<Vec<&'static str>>,
}

impl Navigator for ScreenStack {
    fn replace(&self, transition: Transition) {
        let mut current = self.current.lock().expect("stack mutex poisoned");
        current.clear();
        current.push(transition.screen);
    }
}

#[tokio::test(start_paused = true)]
async fn student_login_lands_on_student_dashboard() {
    let stack = Arc::new(ScreenStack::default());
    let router = RoleRouter::new(Duration::from_secs(1));

    let user = User::new("42", "Chioma Eze", "student");
    let profile = ProfileView::for_user(&user);
    assert_eq!(profile.role_label, "Student User");

    let pending = router.schedule(Some(user), stack.clone());
    assert!(pending.completed().await);

    assert_eq!(
        *stack.current.lock().expect("stack mutex poisoned"),
        vec!["StudentDashboard"]
    );
}

#[tokio::test(start_paused = true)]
async fn unknown_role_defaults_to_student_dashboard() {
    let stack = Arc::new(ScreenStack::default());
    let router = RoleRouter::default();

    let pending = router.schedule(Some(User::new("9", "Landlord", "landlord")), stack.clone());
    assert!(pending.completed().await);

    assert_eq!(
        *stack.current.lock().expect("stack mutex poisoned"),
        vec!["StudentDashboard"]
    );
}

#[test]
fn logout_returns_to_login() {
    let transition = logout();
    assert_eq!(transition.destination, Destination::Login);
    assert_eq!(transition.destination.title(), "BNB Accommodations");
    assert!(transition.user.is_none());
}
