//! Screen sequences the terminal app runs: filling in a safety form for a
//! workplace, and creating an account.

use crate::app::route::{Company, NavIntent, Site};
use crate::app::router::Router;
use crate::auth::{AuthError, AuthProvider};
use crate::config::AppConfig;
use crate::error::Result;
use crate::flows::{EMAIL_FIELD, FlowKind, FlowSource, PASSWORD_FIELD};
use crate::runtime::{FlowOutcome, run_wizard};
use crate::submission::{FormSubmission, SubmissionSink, submit_after};
use crate::terminal::PromptHost;
use std::io::{BufRead, Write};

/// Selects `company` and `site`, runs the form and submits it. `None` when
/// the user leaves the form.
pub fn fill_form<R: BufRead, W: Write>(
    config: &AppConfig,
    source: &FlowSource,
    host: &mut PromptHost<R, W>,
    company: &str,
    site: &str,
    sink: &mut dyn SubmissionSink,
) -> Result<Option<FormSubmission>> {
    let mut router = Router::signed_in();
    let company = Company::new(company);
    let site = Site::new(&company, site);
    router.dispatch(NavIntent::SelectCompany(company))?;
    router.dispatch(NavIntent::SelectSite(site))?;
    if let FlowSource::Builtin(kind) = source {
        router.dispatch(NavIntent::OpenForm(*kind))?;
    }
    let workplace = router.current().workplace().cloned();

    let mut wizard = source.wizard(config)?;
    let data = match run_wizard(source.title(), &mut wizard, host)? {
        FlowOutcome::Completed(data) => data,
        FlowOutcome::Exited => {
            host.message("Form discarded.")?;
            return Ok(None);
        }
    };

    let mut submission = source.finalize(data)?;
    if let Some(workplace) = workplace {
        submission.data.set("company", workplace.company.name);
        submission.data.set("site", workplace.site.name);
    }
    if let Some(level) = submission.data.text("risk_level") {
        host.message(&format!("Fatigue risk: {level}"))?;
    }
    host.message("Submitting...")?;
    submit_after(sink, &submission, config.submission_delay())?;
    if matches!(source, FlowSource::Builtin(_)) {
        router.dispatch(NavIntent::FlowFinished)?;
    }
    Ok(Some(submission))
}

/// Runs the sign-up flow, registers the account and asks for the emailed
/// code until it is accepted. `None` when the user leaves before confirming.
pub fn sign_up<R: BufRead, W: Write>(
    config: &AppConfig,
    host: &mut PromptHost<R, W>,
    auth: &mut dyn AuthProvider,
) -> Result<Option<FormSubmission>> {
    let mut router = Router::new();
    router.dispatch(NavIntent::StartSignUp)?;

    let mut wizard = FlowKind::SignUp.wizard(config)?;
    let data = match run_wizard(FlowKind::SignUp.title(), &mut wizard, host)? {
        FlowOutcome::Completed(data) => data,
        FlowOutcome::Exited => return Ok(None),
    };

    let email = data.text(EMAIL_FIELD).unwrap_or_default().to_string();
    let password = data.text(PASSWORD_FIELD).unwrap_or_default();
    auth.sign_up(&email, password)?;
    router.dispatch(NavIntent::AwaitOtp {
        email: email.clone(),
    })?;

    host.message(&format!("We sent a {}-digit code to {email}.", config.otp_length))?;
    loop {
        let Some(code) = host.read_line("Code:")? else {
            return Ok(None);
        };
        match auth.verify_otp(&email, &code) {
            Ok(_) => break,
            Err(AuthError::InvalidOtp) => host.error(&AuthError::InvalidOtp.to_string())?,
            Err(err) => return Err(err.into()),
        }
    }
    router.dispatch(NavIntent::SignedIn)?;
    host.message("Email confirmed. You are signed in.")?;

    Ok(Some(FlowKind::SignUp.finalize(data)?))
}
