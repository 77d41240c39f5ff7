use safemate::app::{Company, NavIntent, Route, Router, Site};
use safemate::auth::{AuthError, AuthEvent, AuthProvider, MemoryAuth};
use safemate::config::AppConfig;
use safemate::flows::FlowKind;
use safemate::runtime::{Replay, replay};
use safemate::state::DataStore;
use std::cell::RefCell;
use std::rc::Rc;

#[test]
fn sign_up_flow_then_otp_lands_on_company_select() {
    let config = AppConfig::for_tests();
    let mut router = Router::new();
    router.dispatch(NavIntent::StartSignUp).expect("sign up screen");

    let answers = DataStore::new()
        .with("full_name", "Ana Silva")
        .with("email", "ana@mine.com.au")
        .with("employer", "Demo Mining")
        .with("password", "hunter22")
        .with("confirm_password", "hunter22")
        .with("accept_terms", "Yes");
    let mut wizard = FlowKind::SignUp.wizard(&config).expect("wizard");
    let data = match replay(&mut wizard, answers) {
        Replay::Completed(data) => data,
        Replay::Blocked { step, issues } => panic!("blocked at {step}: {issues:?}"),
    };

    let events = Rc::new(RefCell::new(Vec::new()));
    let seen = Rc::clone(&events);
    let mut auth = MemoryAuth::new(&config);
    auth.on_auth_state_change(Box::new(move |event, _| seen.borrow_mut().push(event)));

    let email = data.text("email").expect("email");
    let password = data.text("password").expect("password");
    auth.sign_up(email, password).expect("account");
    router
        .dispatch(NavIntent::AwaitOtp {
            email: email.to_string(),
        })
        .expect("otp screen");

    assert_eq!(auth.verify_otp(email, "12ab56"), Err(AuthError::InvalidOtp));
    auth.verify_otp(email, "123456").expect("confirmed");
    router.dispatch(NavIntent::SignedIn).expect("signed in");

    assert_eq!(router.current(), &Route::CompanySelect);
    assert_eq!(
        *events.borrow(),
        vec![AuthEvent::UserUpdated, AuthEvent::SignedIn]
    );
    assert!(auth.current_user().is_some_and(|user| user.confirmed));
}

#[test]
fn mismatched_passwords_block_the_password_step() {
    let answers = DataStore::new()
        .with("full_name", "Ana Silva")
        .with("email", "ana@mine.com.au")
        .with("employer", "Demo Mining")
        .with("password", "hunter22")
        .with("confirm_password", "hunter23");
    let mut wizard = FlowKind::SignUp
        .wizard(&AppConfig::for_tests())
        .expect("wizard");
    let Replay::Blocked { step, issues } = replay(&mut wizard, answers) else {
        panic!("should block");
    };
    assert_eq!(step, "password");
    assert!(issues.iter().any(|issue| issue.message == "Passwords do not match"));
}

#[test]
fn dashboard_session_round_trip() {
    let mut router = Router::signed_in();
    let company = Company::new("Demo Mining");
    let site = Site::new(&company, "Main Pit");
    router.dispatch(NavIntent::SelectCompany(company)).expect("company");
    router.dispatch(NavIntent::SelectSite(site)).expect("site");

    for kind in FlowKind::ALL.into_iter().filter(|kind| kind.is_safety_form()) {
        let route = router.dispatch(NavIntent::OpenForm(kind)).expect("form");
        assert!(matches!(route, Route::Form { flow, .. } if *flow == kind));
        router.dispatch(NavIntent::FlowFinished).expect("back to dashboard");
    }

    router.dispatch(NavIntent::Back).expect("back");
    assert_eq!(router.current().name(), "site-select");

    let err = router.dispatch(NavIntent::OpenLeaderboard).expect_err("not from site select");
    assert_eq!(err.to_string(), "cannot open leaderboard from site-select");

    router.dispatch(NavIntent::SignedOut).expect("sign out");
    assert_eq!(router.current(), &Route::Welcome);
}
