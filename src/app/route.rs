use crate::flows::FlowKind;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: String,
    pub name: String,
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: slug(&name),
            name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Site {
    pub id: String,
    pub company_id: String,
    pub name: String,
}

impl Site {
    pub fn new(company: &Company, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: slug(&name),
            company_id: company.id.clone(),
            name,
        }
    }
}

/// The company and site a signed-in worker is submitting forms for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workplace {
    pub company: Company,
    pub site: Site,
}

fn slug(name: &str) -> String {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_ascii_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Every screen of the app, each carrying the parameters it needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Welcome,
    SignIn,
    SignUp,
    VerifyOtp { email: String },
    ForgotPassword,
    CompanySelect,
    SiteSelect { company: Company },
    Dashboard { workplace: Workplace },
    Form { flow: FlowKind, workplace: Workplace },
    Leaderboard { workplace: Workplace },
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Welcome => "welcome",
            Self::SignIn => "sign-in",
            Self::SignUp => "sign-up",
            Self::VerifyOtp { .. } => "verify-otp",
            Self::ForgotPassword => "forgot-password",
            Self::CompanySelect => "company-select",
            Self::SiteSelect { .. } => "site-select",
            Self::Dashboard { .. } => "dashboard",
            Self::Form { .. } => "form",
            Self::Leaderboard { .. } => "leaderboard",
        }
    }

    pub fn requires_session(&self) -> bool {
        !matches!(
            self,
            Self::Welcome
                | Self::SignIn
                | Self::SignUp
                | Self::VerifyOtp { .. }
                | Self::ForgotPassword
        )
    }

    pub fn workplace(&self) -> Option<&Workplace> {
        match self {
            Self::Dashboard { workplace }
            | Self::Form { workplace, .. }
            | Self::Leaderboard { workplace } => Some(workplace),
            _ => None,
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Form { flow, .. } => write!(f, "form:{flow}"),
            other => f.write_str(other.name()),
        }
    }
}

/// Navigation requests raised by screens; only the router knows where they lead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavIntent {
    Back,
    StartSignIn,
    StartSignUp,
    ForgotPassword,
    AwaitOtp { email: String },
    SignedIn,
    SignedOut,
    SelectCompany(Company),
    SelectSite(Site),
    OpenForm(FlowKind),
    OpenLeaderboard,
    FlowFinished,
}

impl NavIntent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Back => "go back",
            Self::StartSignIn => "start sign-in",
            Self::StartSignUp => "start sign-up",
            Self::ForgotPassword => "reset password",
            Self::AwaitOtp { .. } => "await code",
            Self::SignedIn => "sign in",
            Self::SignedOut => "sign out",
            Self::SelectCompany(_) => "select company",
            Self::SelectSite(_) => "select site",
            Self::OpenForm(_) => "open form",
            Self::OpenLeaderboard => "open leaderboard",
            Self::FlowFinished => "finish flow",
        }
    }
}
