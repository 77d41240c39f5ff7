use crate::app::route::{NavIntent, Route, Workplace};
use crate::error::{Error, Result};

/// Single dispatcher for app navigation. Screens raise [`NavIntent`]s; the
/// router decides the next [`Route`] and keeps a back stack.
#[derive(Debug, Clone)]
pub struct Router {
    current: Route,
    history: Vec<Route>,
}

impl Default for Router {
    fn default() -> Self {
        Self::new()
    }
}

impl Router {
    pub fn new() -> Self {
        Self {
            current: Route::Welcome,
            history: Vec::new(),
        }
    }

    /// Starts past the auth screens, for a session restored at launch.
    pub fn signed_in() -> Self {
        Self {
            current: Route::CompanySelect,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &Route {
        &self.current
    }

    pub fn depth(&self) -> usize {
        self.history.len()
    }

    pub fn dispatch(&mut self, intent: NavIntent) -> Result<&Route> {
        match self.next(intent)? {
            Step::Push(route) => {
                let previous = std::mem::replace(&mut self.current, route);
                self.history.push(previous);
            }
            Step::Reset(route) => {
                self.history.clear();
                self.current = route;
            }
            Step::Pop => {
                // `next` only yields Pop with a non-empty history.
                if let Some(previous) = self.history.pop() {
                    self.current = previous;
                }
            }
            Step::PopTo(route) => {
                while let Some(previous) = self.history.pop() {
                    if previous == route {
                        break;
                    }
                }
                self.current = route;
            }
        }
        tracing::debug!(route = %self.current, depth = self.history.len(), "navigated");
        Ok(&self.current)
    }

    fn next(&self, intent: NavIntent) -> Result<Step> {
        let step = match (&self.current, intent) {
            (_, NavIntent::Back) if !self.history.is_empty() => Step::Pop,
            (route, NavIntent::SignedOut) if route.requires_session() => Step::Reset(Route::Welcome),
            (Route::Welcome, NavIntent::StartSignIn) => Step::Push(Route::SignIn),
            (Route::Welcome | Route::SignIn, NavIntent::StartSignUp) => Step::Push(Route::SignUp),
            (Route::SignIn, NavIntent::ForgotPassword) => Step::Push(Route::ForgotPassword),
            (Route::SignUp | Route::SignIn, NavIntent::AwaitOtp { email }) => {
                Step::Push(Route::VerifyOtp { email })
            }
            (Route::SignIn | Route::VerifyOtp { .. }, NavIntent::SignedIn) => {
                Step::Reset(Route::CompanySelect)
            }
            (Route::CompanySelect, NavIntent::SelectCompany(company)) => {
                Step::Push(Route::SiteSelect { company })
            }
            (Route::SiteSelect { company }, NavIntent::SelectSite(site))
                if site.company_id == company.id =>
            {
                Step::Push(Route::Dashboard {
                    workplace: Workplace {
                        company: company.clone(),
                        site,
                    },
                })
            }
            (Route::Dashboard { workplace }, NavIntent::OpenForm(flow)) if flow.is_safety_form() => {
                Step::Push(Route::Form {
                    flow,
                    workplace: workplace.clone(),
                })
            }
            (Route::Dashboard { workplace }, NavIntent::OpenLeaderboard) => {
                Step::Push(Route::Leaderboard {
                    workplace: workplace.clone(),
                })
            }
            (Route::Form { workplace, .. }, NavIntent::FlowFinished) => {
                Step::PopTo(Route::Dashboard {
                    workplace: workplace.clone(),
                })
            }
            (route, intent) => {
                return Err(Error::InvalidNavigation {
                    route: route.to_string(),
                    intent: intent.name().to_string(),
                });
            }
        };
        Ok(step)
    }
}

enum Step {
    Push(Route),
    Reset(Route),
    Pop,
    PopTo(Route),
}

#[cfg(test)]
mod tests {
    use super::Router;
    use crate::app::route::{Company, NavIntent, Route, Site};
    use crate::error::Error;
    use crate::flows::FlowKind;

    fn at_dashboard() -> Router {
        let mut router = Router::signed_in();
        let company = Company::new("Demo Mining");
        let site = Site::new(&company, "Pit 1");
        router.dispatch(NavIntent::SelectCompany(company)).expect("company");
        router.dispatch(NavIntent::SelectSite(site)).expect("site");
        router
    }

    #[test]
    fn onboarding_reaches_company_select_without_back_stack() {
        let mut router = Router::new();
        router.dispatch(NavIntent::StartSignIn).expect("sign in");
        router.dispatch(NavIntent::StartSignUp).expect("sign up");
        router
            .dispatch(NavIntent::AwaitOtp {
                email: "a@b.co".into(),
            })
            .expect("otp");
        assert_eq!(
            router.current(),
            &Route::VerifyOtp {
                email: "a@b.co".into()
            }
        );

        router.dispatch(NavIntent::SignedIn).expect("signed in");
        assert_eq!(router.current(), &Route::CompanySelect);
        assert_eq!(router.depth(), 0);
        assert!(router.dispatch(NavIntent::Back).is_err());
    }

    #[test]
    fn form_returns_to_dashboard_when_finished() {
        let mut router = at_dashboard();
        let route = router
            .dispatch(NavIntent::OpenForm(FlowKind::Fatigue))
            .expect("form")
            .clone();
        assert_eq!(route.to_string(), "form:fatigue");
        assert_eq!(route.workplace().map(|w| w.site.name.as_str()), Some("Pit 1"));

        router.dispatch(NavIntent::FlowFinished).expect("finished");
        assert_eq!(router.current().name(), "dashboard");
        assert_eq!(router.depth(), 2);
    }

    #[test]
    fn rejects_intents_that_do_not_fit_the_route() {
        let mut router = Router::new();
        let err = router
            .dispatch(NavIntent::OpenForm(FlowKind::PaceCard))
            .expect_err("no form from welcome");
        assert!(matches!(err, Error::InvalidNavigation { ref route, .. } if route == "welcome"));

        let mut router = at_dashboard();
        assert!(router.dispatch(NavIntent::OpenForm(FlowKind::SignUp)).is_err());
        assert!(router.dispatch(NavIntent::SignedIn).is_err());
    }

    #[test]
    fn site_must_belong_to_selected_company() {
        let mut router = Router::signed_in();
        let company = Company::new("Demo Mining");
        let other = Company::new("Other Co");
        router.dispatch(NavIntent::SelectCompany(company)).expect("company");
        assert!(router.dispatch(NavIntent::SelectSite(Site::new(&other, "Pit 9"))).is_err());
    }

    #[test]
    fn sign_out_resets_to_welcome() {
        let mut router = at_dashboard();
        router.dispatch(NavIntent::OpenLeaderboard).expect("leaderboard");
        router.dispatch(NavIntent::SignedOut).expect("signed out");
        assert_eq!(router.current(), &Route::Welcome);
        assert_eq!(router.depth(), 0);
    }
}
