//! Client session: the mode selector and the single in-flight request
//!
//! `Idle -> Pending -> Idle`. `begin` validates and enters Pending, `complete` leaves it.
//! A second `begin` while Pending is refused with `ClientError::Busy`.

use tracing::{debug, info, warn};

use crate::{
    directory::SignatureDirectory,
    error::{ClientError, ClientResult},
    types::{Mode, Outcome},
    validation::{HexSignature, TextSignature},
};

/// Validate `input` as a hex selector and look it up.
pub fn lookup<D>(dir: &D, input: &str) -> ClientResult<Outcome>
where
    D: SignatureDirectory + ?Sized,
{
    let hex: HexSignature = input.parse()?;
    Request::Lookup(hex).execute(dir)
}

/// Validate `input` as a text signature and register it.
pub fn register<D>(dir: &D, input: &str) -> ClientResult<Outcome>
where
    D: SignatureDirectory + ?Sized,
{
    let text: TextSignature = input.parse()?;
    Request::Register(text).execute(dir)
}

/// A validated request, ready to be sent.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Request {
    Lookup(HexSignature),
    Register(TextSignature),
}

impl Request {
    pub fn execute<D>(&self, dir: &D) -> ClientResult<Outcome>
    where
        D: SignatureDirectory + ?Sized,
    {
        match self {
            Request::Lookup(hex) => Ok(dir.search(hex)?.into_outcome()),
            Request::Register(text) => Ok(Outcome::Created(dir.create(text)?)),
        }
    }

    pub fn mode(&self) -> Mode {
        match self {
            Request::Lookup(_) => Mode::Decode,
            Request::Register(_) => Mode::Add,
        }
    }
}

#[derive(Debug, Default)]
pub struct Session {
    mode: Mode,
    pending: bool,
    last: Option<ClientResult<Outcome>>,
}

impl Session {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    /// Result of the most recent submission, kept until the next one.
    pub fn last(&self) -> Option<&ClientResult<Outcome>> {
        self.last.as_ref()
    }

    pub fn set_mode(&mut self, mode: Mode) -> ClientResult<()> {
        if self.pending {
            return Err(ClientError::Busy);
        }
        self.mode = mode;
        Ok(())
    }

    pub fn toggle_mode(&mut self) -> ClientResult<Mode> {
        self.set_mode(self.mode.toggle())?;
        Ok(self.mode)
    }

    /// Validate `input` for the current mode and enter Pending.
    ///
    /// Validation failures are recorded as the last result and leave the session Idle.
    pub fn begin(&mut self, input: &str) -> ClientResult<Request> {
        if self.pending {
            warn!(mode = %self.mode, "submission ignored, request already in flight");
            return Err(ClientError::Busy);
        }

        let request = match self.mode {
            Mode::Decode => input.parse().map(Request::Lookup),
            Mode::Add => input.parse().map(Request::Register),
        };

        match request {
            Ok(request) => {
                debug!(mode = %self.mode, "request pending");
                self.pending = true;
                Ok(request)
            }
            Err(e) => {
                debug!(mode = %self.mode, error = %e, "input rejected");
                self.last = Some(Err(e.clone()));
                Err(e)
            }
        }
    }

    /// Leave Pending and record `result`.
    pub fn complete(&mut self, result: ClientResult<Outcome>) -> ClientResult<Outcome> {
        self.pending = false;
        match &result {
            Ok(outcome) => info!(mode = %self.mode, outcome = outcome_name(outcome), "request finished"),
            Err(e) => warn!(mode = %self.mode, kind = e.kind(), error = %e, "request failed"),
        }
        self.last = Some(result.clone());
        result
    }

    /// `begin`, execute against `dir`, then `complete`.
    pub fn submit<D>(&mut self, dir: &D, input: &str) -> ClientResult<Outcome>
    where
        D: SignatureDirectory + ?Sized,
    {
        let request = self.begin(input)?;
        let result = request.execute(dir);
        self.complete(result)
    }
}

fn outcome_name(outcome: &Outcome) -> &'static str {
    match outcome {
        Outcome::NoMatches => "no_matches",
        Outcome::Matches { .. } => "matches",
        Outcome::Created(_) => "created",
    }
}
