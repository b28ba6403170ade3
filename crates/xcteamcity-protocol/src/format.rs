// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! The line-formatting port
//!
//! [`EventFormat`] has one method per event kind. Every method defaults to
//! producing no lines, so an implementation overrides only the kinds it
//! customizes; the provided [`EventFormat::apply`] dispatches an [`Event`]
//! to the matching method.

use xcteamcity_events::{
    CompileIssue, DuplicateSymbols, Event, FileMissingIssue, UndefinedSymbols,
};

/// Protocol lines produced for one event: 0, 1, or 3
pub type Lines = Vec<String>;

/// One formatting method per upstream event kind
#[allow(unused_variables)]
pub trait EventFormat {
    fn compilation_started(&mut self) -> Lines {
        Lines::new()
    }

    fn compilation_finished(&mut self) -> Lines {
        Lines::new()
    }

    fn check_dependencies(&mut self) -> Lines {
        Lines::new()
    }

    fn build_target(&mut self, target: &str, project: &str, configuration: &str) -> Lines {
        Lines::new()
    }

    fn compile(&mut self, file_name: &str, file_path: &str) -> Lines {
        Lines::new()
    }

    fn touch(&mut self, file_path: &str, file_name: &str) -> Lines {
        Lines::new()
    }

    fn phase_success(&mut self, phase_name: &str) -> Lines {
        Lines::new()
    }

    fn test_run_started(&mut self, name: &str) -> Lines {
        Lines::new()
    }

    fn test_run_finished(&mut self, name: &str, elapsed: &str) -> Lines {
        Lines::new()
    }

    fn test_suite_started(&mut self, name: &str) -> Lines {
        Lines::new()
    }

    fn passing_test(&mut self, suite: &str, test: &str, elapsed: &str) -> Lines {
        Lines::new()
    }

    fn failing_test(&mut self, suite: &str, test: &str, elapsed: &str, file_path: &str) -> Lines {
        Lines::new()
    }

    fn warning(&mut self, message: &str) -> Lines {
        Lines::new()
    }

    fn compile_warning(&mut self, issue: &CompileIssue) -> Lines {
        Lines::new()
    }

    fn ld_warning(&mut self, message: &str) -> Lines {
        Lines::new()
    }

    fn error(&mut self, message: &str) -> Lines {
        Lines::new()
    }

    fn compile_error(&mut self, issue: &CompileIssue) -> Lines {
        Lines::new()
    }

    fn file_missing_error(&mut self, issue: &FileMissingIssue) -> Lines {
        Lines::new()
    }

    fn undefined_symbols_error(&mut self, symbols: &UndefinedSymbols) -> Lines {
        Lines::new()
    }

    fn duplicate_symbols_error(&mut self, symbols: &DuplicateSymbols) -> Lines {
        Lines::new()
    }

    fn test_summary(&mut self, message: &str) -> Lines {
        Lines::new()
    }

    /// Dispatch an event to its formatting method
    fn apply(&mut self, event: &Event) -> Lines {
        match event {
            Event::CompilationStarted => self.compilation_started(),
            Event::CompilationFinished => self.compilation_finished(),
            Event::CheckDependencies => self.check_dependencies(),
            Event::BuildTarget {
                target,
                project,
                configuration,
            } => self.build_target(target, project, configuration),
            Event::Compile {
                file_name,
                file_path,
            } => self.compile(file_name, file_path),
            Event::Touch {
                file_path,
                file_name,
            } => self.touch(file_path, file_name),
            Event::PhaseSuccess { phase_name } => self.phase_success(phase_name),
            Event::TestRunStarted { name } => self.test_run_started(name),
            Event::TestRunFinished { name, elapsed } => self.test_run_finished(name, elapsed),
            Event::TestSuiteStarted { name } => self.test_suite_started(name),
            Event::PassingTest {
                suite,
                test,
                elapsed,
            } => self.passing_test(suite, test, elapsed),
            Event::FailingTest {
                suite,
                test,
                elapsed,
                file_path,
            } => self.failing_test(suite, test, elapsed, file_path),
            Event::Warning { message } => self.warning(message),
            Event::CompileWarning(issue) => self.compile_warning(issue),
            Event::LdWarning { message } => self.ld_warning(message),
            Event::Error { message } => self.error(message),
            Event::CompileError(issue) => self.compile_error(issue),
            Event::FileMissingError(issue) => self.file_missing_error(issue),
            Event::UndefinedSymbolsError(symbols) => self.undefined_symbols_error(symbols),
            Event::DuplicateSymbolsError(symbols) => self.duplicate_symbols_error(symbols),
            Event::TestSummary { message, .. } => self.test_summary(message),
        }
    }
}
