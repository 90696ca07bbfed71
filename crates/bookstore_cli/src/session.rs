//! Interactive menu loop over any line-based input/output pair.
//!
//! # Responsibility
//! - Collect commands and field values, hand them to `CatalogueService`.
//! - Render result rows and not-found/validation messages.
//!
//! # Invariants
//! - Every write goes through an explicit YES/NO prompt.
//! - `quit` or end of input leaves the catalogue untouched mid-workflow.
//! - Service errors are reported and the loop continues.

use crate::table::render_books;
use bookstore_core::{
    BookFields, BookId, BookRecord, BookRepository, CatalogueError, CatalogueService,
    Confirmation, SearchField, WorkflowOutcome,
};
use log::warn;
use std::io::{self, BufRead, Write};

const QUIT: &str = "quit";
const NOT_RECOGNISED: &str = "Input not recognised!";

/// Top-level menu command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    ViewAll,
    Search,
    Add,
    Delete,
    Modify,
    Quit,
}

impl MenuCommand {
    /// Parses a menu choice case-insensitively, accepting long forms such
    /// as `view all` or `add book`.
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "view" | "view all" => Some(Self::ViewAll),
            "search" | "search books" => Some(Self::Search),
            "add" | "add book" => Some(Self::Add),
            "delete" | "delete book" => Some(Self::Delete),
            "modify" | "modify book" => Some(Self::Modify),
            "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// One interactive session bound to a catalogue service.
pub struct Session<R: BookRepository, I: BufRead, O: Write> {
    service: CatalogueService<R>,
    input: I,
    output: O,
}

impl<R: BookRepository, I: BufRead, O: Write> Session<R, I, O> {
    pub fn new(service: CatalogueService<R>, input: I, output: O) -> Self {
        Self {
            service,
            input,
            output,
        }
    }

    /// Runs the main menu until `quit`/`exit` or end of input.
    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let Some(choice) =
                self.prompt("What would you like to do? - view all/add/search/delete/modify/quit\n> ")?
            else {
                return Ok(());
            };

            match MenuCommand::parse(&choice) {
                Some(MenuCommand::ViewAll) => self.print_catalogue()?,
                Some(MenuCommand::Search) => self.search_loop()?,
                Some(MenuCommand::Add) => {
                    self.print_catalogue()?;
                    self.add_loop()?;
                }
                Some(MenuCommand::Delete) => {
                    self.print_catalogue()?;
                    self.delete_loop()?;
                }
                Some(MenuCommand::Modify) => {
                    self.print_catalogue()?;
                    self.modify_loop()?;
                }
                Some(MenuCommand::Quit) => {
                    writeln!(self.output, "Goodbye!")?;
                    return Ok(());
                }
                None => writeln!(self.output, "{NOT_RECOGNISED}")?,
            }
        }
    }

    fn search_loop(&mut self) -> io::Result<()> {
        loop {
            let Some(choice) = self.prompt("Search by id/title/author/quantity/quit\n> ")? else {
                return Ok(());
            };
            if is_quit(&choice) {
                return Ok(());
            }
            let Ok(field) = choice.parse::<SearchField>() else {
                writeln!(self.output, "{NOT_RECOGNISED}")?;
                continue;
            };

            let Some(term) = self.prompt(&format!("Enter {}: ", field_prompt(field)))? else {
                return Ok(());
            };
            match self.service.search_input(field, &term) {
                Ok(books) if books.is_empty() => writeln!(
                    self.output,
                    "{}: {term} not found in database.",
                    field.label()
                )?,
                Ok(books) => self.print_books(&books)?,
                Err(err) => self.report(&err)?,
            }
        }
    }

    fn add_loop(&mut self) -> io::Result<()> {
        loop {
            let Some(raw_id) = self.prompt("Add a book by entering a 4 digit ID or type quit.\n> ")?
            else {
                return Ok(());
            };
            if is_quit(&raw_id) {
                return Ok(());
            }

            match self.service.validate_new_id(&raw_id) {
                Ok(_) => {}
                Err(CatalogueError::DuplicateKey(_)) => {
                    writeln!(self.output, "ID already in use.")?;
                    continue;
                }
                Err(err) => {
                    self.report(&err)?;
                    continue;
                }
            }

            let Some(fields) = self.read_fields(["Enter Title: ", "Enter Author: ", "Enter Quantity: "])?
            else {
                return Ok(());
            };
            let candidate = match self.service.prepare_add(&raw_id, &fields) {
                Ok(candidate) => candidate,
                Err(err) => {
                    self.report(&err)?;
                    continue;
                }
            };

            self.print_books(std::slice::from_ref(&candidate))?;
            writeln!(self.output, "Is all this information correct?")?;
            let confirmation = self.confirm()?;
            match self.service.commit_add(&candidate, confirmation) {
                Ok(WorkflowOutcome::Committed(book)) => {
                    writeln!(self.output, "ID: {} added to database.\n", book.id)?;
                    self.print_catalogue()?;
                }
                Ok(WorkflowOutcome::Aborted) => {}
                Err(err) => self.report(&err)?,
            }
            return Ok(());
        }
    }

    fn delete_loop(&mut self) -> io::Result<()> {
        loop {
            let Some(raw_id) =
                self.prompt("You can delete a book by typing it's ID or type quit.\n> ")?
            else {
                return Ok(());
            };
            if is_quit(&raw_id) {
                return Ok(());
            }

            let book = match self.lookup(&raw_id)? {
                Some(book) => book,
                None => continue,
            };
            writeln!(
                self.output,
                "Record found. Please check record before confirming deletion!"
            )?;
            self.print_books(std::slice::from_ref(&book))?;

            let confirmation = self.confirm()?;
            match self.service.commit_delete(&book, confirmation) {
                Ok(WorkflowOutcome::Committed(book)) => {
                    writeln!(self.output, "ID: {} deleted.", book.id)?
                }
                Ok(WorkflowOutcome::Aborted) => {}
                Err(err) => self.report(&err)?,
            }
            return Ok(());
        }
    }

    fn modify_loop(&mut self) -> io::Result<()> {
        loop {
            let Some(raw_id) =
                self.prompt("You can modify a book by typing it's ID or type quit.\n> ")?
            else {
                return Ok(());
            };
            if is_quit(&raw_id) {
                return Ok(());
            }

            let current = match self.lookup(&raw_id)? {
                Some(book) => book,
                None => continue,
            };
            writeln!(self.output, "Record found. Please check record is correct!")?;
            self.print_books(std::slice::from_ref(&current))?;
            writeln!(
                self.output,
                "\nType the new value or hit enter to keep it the same"
            )?;

            let prompts = [
                format!("{}: ", current.title),
                format!("{}: ", current.author),
                format!("{}: ", current.quantity),
            ];
            let Some(edits) = self.read_fields(prompts)? else {
                return Ok(());
            };
            let plan = match self.service.prepare_modify(current.id, &edits) {
                Ok(plan) => plan,
                Err(err) => {
                    self.report(&err)?;
                    continue;
                }
            };

            self.print_books(&[plan.current.clone(), plan.updated.clone()])?;
            writeln!(self.output, "Are these updated values correct?")?;
            let confirmation = self.confirm()?;
            match self.service.commit_modify(&plan, confirmation) {
                Ok(WorkflowOutcome::Committed(book)) => {
                    writeln!(self.output, "ID: {} modified.", book.id)?
                }
                Ok(WorkflowOutcome::Aborted) => {}
                Err(err) => self.report(&err)?,
            }
            return Ok(());
        }
    }

    /// Resolves an existing record for delete/modify, printing the
    /// not-found message when there is none.
    fn lookup(&mut self, raw_id: &str) -> io::Result<Option<BookRecord>> {
        let trimmed = raw_id.trim();
        let Ok(id) = trimmed.parse::<BookId>() else {
            writeln!(self.output, "ID: {trimmed} not found.")?;
            return Ok(None);
        };
        match self.service.find(id) {
            Ok(Some(book)) => Ok(Some(book)),
            Ok(None) => {
                writeln!(self.output, "ID: {trimmed} not found.")?;
                Ok(None)
            }
            Err(err) => {
                self.report(&err)?;
                Ok(None)
            }
        }
    }

    fn read_fields<P: AsRef<str>>(&mut self, prompts: [P; 3]) -> io::Result<Option<BookFields>> {
        let [title, author, quantity] = prompts;
        let Some(title) = self.prompt(title.as_ref())? else {
            return Ok(None);
        };
        let Some(author) = self.prompt(author.as_ref())? else {
            return Ok(None);
        };
        let Some(quantity) = self.prompt(quantity.as_ref())? else {
            return Ok(None);
        };
        Ok(Some(BookFields::new(title, author, quantity)))
    }

    /// Asks until a YES or NO answer arrives. End of input declines.
    fn confirm(&mut self) -> io::Result<Confirmation> {
        loop {
            let Some(answer) =
                self.prompt("type YES to confirm, type NO to return to main menu.\n> ")?
            else {
                return Ok(Confirmation::Declined);
            };
            match Confirmation::from_answer(&answer) {
                Some(confirmation) => return Ok(confirmation),
                None => writeln!(self.output, "{NOT_RECOGNISED}")?,
            }
        }
    }

    fn print_catalogue(&mut self) -> io::Result<()> {
        match self.service.list_all() {
            Ok(books) => self.print_books(&books),
            Err(err) => self.report(&err),
        }
    }

    fn print_books(&mut self, books: &[BookRecord]) -> io::Result<()> {
        writeln!(self.output, "{}", render_books(books))
    }

    fn report(&mut self, err: &CatalogueError) -> io::Result<()> {
        if let CatalogueError::Repo(source) = err {
            warn!("event=session_error module=cli status=error error={source}");
            return writeln!(self.output, "Database error: {source}");
        }
        writeln!(self.output, "{err}")
    }

    /// Writes `message` and reads one line without its line ending.
    /// Returns `None` at end of input.
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        // Undecodable bytes become U+FFFD and fall through as unrecognised input.
        let mut raw = Vec::new();
        if self.input.read_until(b'\n', &mut raw)? == 0 {
            return Ok(None);
        }
        let line = String::from_utf8_lossy(&raw);
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }
}

fn is_quit(input: &str) -> bool {
    input.trim().eq_ignore_ascii_case(QUIT)
}

fn field_prompt(field: SearchField) -> &'static str {
    match field {
        SearchField::Id => "ID",
        SearchField::Title => "Title",
        SearchField::Author => "Author",
        SearchField::Quantity => "Quantity",
    }
}
