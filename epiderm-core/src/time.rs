//! Controls how the simulation time is advanced

use kdam::BarExt;
use serde::{Deserialize, Serialize};

use epiderm_concepts::TimeError;

/// A [TimeEvent] describes that a certain action is to be executed after the next iteration step.
#[derive(Clone, Copy, Debug, Deserialize, PartialEq, Eq, Serialize)]
pub enum TimeEvent {
    /// Saves the current population for later readout.
    PartialSave,
}

/// Represents the next time point which is returned by the [TimeStepper::advance] method.
///
/// The absolute time value $t$ is not used by the lineage rules, which only act per step.
/// It is meant for annotating saved results.
#[derive(Clone, Debug, PartialEq)]
pub struct NextTimePoint<F> {
    /// Time increment $dt$
    pub increment: F,
    /// Time value $t$
    pub time: F,
    /// Current iteration
    pub iteration: usize,
    /// Event at this iteration, or None
    pub event: Option<TimeEvent>,
}

/// Increments time of the simulation
pub trait TimeStepper<F> {
    /// Advances the time stepper to the next time point. Also returns if there is an event
    /// scheduled to take place and the next time value and iteration number
    #[must_use]
    fn advance(&mut self) -> Result<Option<NextTimePoint<F>>, TimeError>;

    /// Event which is due before the first step is taken.
    fn initial_event(&self) -> Option<TimeEvent>;

    /// Creates a bar that tracks the simulation progress
    fn initialize_bar(&self) -> Result<kdam::Bar, TimeError>;

    /// Update a given bar to show the current simulation state
    fn update_bar(&self, bar: &mut kdam::Bar) -> Result<(), std::io::Error>;
}

/// Time stepping with a fixed time length
///
/// This time-stepper increments the time variable by the same length for a fixed number of
/// steps.
/// ```
/// # use epiderm_core::time::*;
/// let mut time = FixedStepsize::from_partial_save_steps(0.0, 0.5, 4, 2).unwrap();
/// assert_eq!(time.initial_event(), Some(TimeEvent::PartialSave));
/// let next = time.advance().unwrap().unwrap();
/// assert_eq!(next.time, 0.5);
/// assert_eq!(next.event, None);
/// let next = time.advance().unwrap().unwrap();
/// assert_eq!(next.event, Some(TimeEvent::PartialSave));
/// ```
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FixedStepsize<F> {
    dt: F,
    t0: F,
    n_steps: usize,
    // Sorted iterations after which the population is saved
    save_iterations: Vec<usize>,
    current_iteration: usize,
}

impl<F> FixedStepsize<F>
where
    F: num::Float + num::FromPrimitive,
{
    /// Construct the stepper from initial time, increment, number of steps and save interval.
    ///
    /// Results are saved at iteration `0`, every `save_interval` iterations and after the last
    /// step.
    pub fn from_partial_save_steps(
        t0: F,
        dt: F,
        n_steps: u64,
        save_interval: u64,
    ) -> Result<Self, TimeError> {
        if !(dt > F::zero() && dt.is_finite()) {
            return Err(TimeError(
                "Time increment dt must be positive and finite".to_owned(),
            ));
        }
        if save_interval == 0 {
            return Err(TimeError("Save interval must be larger than 0".to_owned()));
        }
        let n_steps = usize::try_from(n_steps)
            .map_err(|e| TimeError(format!("Cannot represent {n_steps} steps: {e}")))?;
        let save_interval = usize::try_from(save_interval).unwrap_or(usize::MAX);
        let mut save_iterations: Vec<usize> = (0..=n_steps).step_by(save_interval).collect();
        if save_iterations.last() != Some(&n_steps) {
            save_iterations.push(n_steps);
        }
        Ok(Self {
            dt,
            t0,
            n_steps,
            save_iterations,
            current_iteration: 0,
        })
    }

    /// Similar to [Self::from_partial_save_steps] but specifies the end time and the
    /// interval between save points in units of time.
    pub fn from_partial_save_interval(
        t0: F,
        dt: F,
        t_max: F,
        save_interval: F,
    ) -> Result<Self, TimeError> {
        let to_steps = |value: F, name: &str| -> Result<u64, TimeError> {
            (value / dt).round().to_u64().ok_or(TimeError(format!(
                "Could not convert {name} to a number of steps of type {}",
                std::any::type_name::<u64>()
            )))
        };
        if t_max < t0 {
            return Err(TimeError(
                "Invalid time configuration! End time point is before starting time point."
                    .to_owned(),
            ));
        }
        let n_steps = to_steps(t_max - t0, "time span")?;
        let save_interval = to_steps(save_interval, "save interval")?.max(1);
        Self::from_partial_save_steps(t0, dt, n_steps, save_interval)
    }

    /// Total number of steps which will be taken.
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// The fixed time increment.
    pub fn increment(&self) -> F {
        self.dt
    }

    /// Time at which the simulation starts.
    pub fn initial_time(&self) -> F {
        self.t0
    }
}

impl<F> TimeStepper<F> for FixedStepsize<F>
where
    F: num::Float + num::FromPrimitive,
{
    fn advance(&mut self) -> Result<Option<NextTimePoint<F>>, TimeError> {
        if self.current_iteration >= self.n_steps {
            return Ok(None);
        }
        self.current_iteration += 1;
        let time = F::from_usize(self.current_iteration).ok_or(TimeError(
            "Error when casting from usize to floating point value".to_owned(),
        ))? * self.dt
            + self.t0;
        let event = self
            .save_iterations
            .binary_search(&self.current_iteration)
            .ok()
            .map(|_| TimeEvent::PartialSave);
        Ok(Some(NextTimePoint {
            increment: self.dt,
            time,
            iteration: self.current_iteration,
            event,
        }))
    }

    fn initial_event(&self) -> Option<TimeEvent> {
        self.save_iterations
            .first()
            .filter(|&&iteration| iteration == 0)
            .map(|_| TimeEvent::PartialSave)
    }

    fn initialize_bar(&self) -> Result<kdam::Bar, TimeError> {
        let bar_format = "\
        {desc}{percentage:3.0}%|{animation}| \
        {count}/{total} \
        [{elapsed}, \
        {rate:.2}{unit}/s{postfix}]";
        Ok(kdam::BarBuilder::default()
            .total(self.n_steps)
            .bar_format(bar_format)
            .dynamic_ncols(true)
            .build()?)
    }

    fn update_bar(&self, bar: &mut kdam::Bar) -> Result<(), std::io::Error> {
        let _ = bar.update(1)?;
        Ok(())
    }
}
