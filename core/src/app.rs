//! The demo wiring: two periodic tasks plus quit-watching standard input.

use std::io::{self, Write};

use tickloop_types::{Interval, Publisher};

use crate::error::Result;
use crate::handlers::{InputHandler, TimerHandler};
use crate::input::InputSource;
use crate::reactor::{EventLoop, LoopBuilder, Turn};
use crate::tasks::{Task, TaskKind};
use crate::timer::TimerSource;

pub struct App {
    event_loop: EventLoop,
    popcount: Publisher,
    leading_zeros: Publisher,
}

impl App {
    /// Standard input for quit commands, standard output for task lines.
    pub fn new() -> Result<Self> {
        Self::with_io(InputSource::stdin()?, io::stdout)
    }

    /// Build with an explicit input and one output writer per task.
    pub fn with_io<W, F>(input: InputSource, mut output: F) -> Result<Self>
    where
        W: Write + 'static,
        F: FnMut() -> W,
    {
        let fast = Task::new(TaskKind::Popcount);
        let slow = Task::new(TaskKind::LeadingZeros);
        let popcount = fast.publisher();
        let leading_zeros = slow.publisher();

        let event_loop = LoopBuilder::new()?
            .register(TimerHandler::new(
                TimerSource::new("timer 10ms", Interval::FAST_TICK)?,
                fast,
                output(),
            ))?
            .register(TimerHandler::new(
                TimerSource::new("timer 100ms", Interval::SLOW_TICK)?,
                slow,
                output(),
            ))?
            .register(InputHandler::new(input))?
            .build();

        Ok(Self {
            event_loop,
            popcount,
            leading_zeros,
        })
    }

    /// Producer handle for the task of `kind`.
    #[must_use]
    pub fn publisher(&self, kind: TaskKind) -> Publisher {
        match kind {
            TaskKind::Popcount => self.popcount.clone(),
            TaskKind::LeadingZeros => self.leading_zeros.clone(),
        }
    }

    /// Run until a quit command arrives on the input.
    pub fn run(&mut self) -> Result<()> {
        self.event_loop.run()
    }

    pub fn turn(&mut self) -> Result<Turn> {
        self.event_loop.turn()
    }

    #[must_use]
    pub fn event_loop(&self) -> &EventLoop {
        &self.event_loop
    }
}
