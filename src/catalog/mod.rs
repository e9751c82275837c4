//! Prompt catalog: the static set of demo prompts and their tool needs.

use std::path::PathBuf;

/// Kind of hosted or local tool a prompt declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolKind {
    /// Server-side code interpreter, optionally seeded with a local file.
    CodeInterpreter,
    /// Hosted search index behind a connection id.
    Search,
    /// Web grounding behind a connection id.
    Grounding,
    /// Local function tools from the registry.
    Function,
}

impl ToolKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CodeInterpreter => "code-interpreter",
            Self::Search => "search",
            Self::Grounding => "grounding",
            Self::Function => "function-tool",
        }
    }
}

/// One selectable prompt: text, optional tool, optional input file.
///
/// Read once per selection; never mutated while a run is in flight.
#[derive(Debug, Clone)]
pub struct PromptSpec {
    pub key: &'static str,
    pub prompt: &'static str,
    pub tool: Option<ToolKind>,
    pub file_path: Option<PathBuf>,
    pub instructions: Option<&'static str>,
    pub emoji: &'static str,
}

impl PromptSpec {
    fn new(key: &'static str, prompt: &'static str, emoji: &'static str) -> Self {
        Self {
            key,
            prompt,
            tool: None,
            file_path: None,
            instructions: None,
            emoji,
        }
    }

    fn with_tool(mut self, tool: ToolKind) -> Self {
        self.tool = Some(tool);
        self
    }

    fn with_file(mut self, path: &str) -> Self {
        self.file_path = Some(PathBuf::from(path));
        self
    }

    fn with_instructions(mut self, instructions: &'static str) -> Self {
        self.instructions = Some(instructions);
        self
    }

    /// Menu label derived from the camelCase key.
    pub fn title(&self) -> String {
        title_case(self.key)
    }
}

/// The demo's fixed prompt set.
#[derive(Debug, Clone)]
pub struct PromptCatalog {
    prompts: Vec<PromptSpec>,
}

impl PromptCatalog {
    pub fn builtin() -> Self {
        Self {
            prompts: vec![
                PromptSpec::new(
                    "solveEquation",
                    "I need to solve the equation `3x + 11 = 14`. Can you help me?",
                    "\u{1F9EE}",
                ),
                PromptSpec::new(
                    "codeGenerator",
                    "Write a function that finds prime numbers",
                    "\u{1F4BB}",
                )
                .with_tool(ToolKind::CodeInterpreter),
                PromptSpec::new(
                    "dataVisualization",
                    "Create visualizations from the car_sales.csv data. Include charts for:\n\
                     - Sales by Region\n\
                     - Relationships between Price, Mileage, and Year.\n\
                     - Sales by SalesPerson.\n\
                     - Sales by Make, Model, and Year for 2023.",
                    "\u{1F4CA}",
                )
                .with_tool(ToolKind::CodeInterpreter)
                .with_file("./files/car_sales_data.csv"),
                PromptSpec::new(
                    "hotelReviews",
                    "Tell me about the hotel reviews in the HotelReviews_data.csv.",
                    "\u{1F3E8}",
                )
                .with_tool(ToolKind::CodeInterpreter)
                .with_file("./files/hotel_reviews_data.csv"),
                PromptSpec::new(
                    "insuranceCoverage",
                    "What are my health insurance plan coverage types?",
                    "\u{1F3E5}",
                )
                .with_tool(ToolKind::Search)
                .with_instructions(
                    "You are a helpful agent that answers questions about health \
                     insurance plans using the connected search index.",
                ),
                PromptSpec::new(
                    "cpuUsage",
                    "What is the current CPU usage of this machine?",
                    "\u{1F4A1}",
                )
                .with_tool(ToolKind::Function),
            ],
        }
    }

    pub fn prompts(&self) -> &[PromptSpec] {
        &self.prompts
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Selection by zero-based menu index.
    pub fn get(&self, index: usize) -> Option<&PromptSpec> {
        self.prompts.get(index)
    }

    /// Selection by key, for one-shot invocation.
    pub fn find(&self, key: &str) -> Option<&PromptSpec> {
        self.prompts.iter().find(|p| p.key == key)
    }
}

/// Format a camelCase key as "Title Case" with spaces.
pub fn title_case(key: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    for ch in key.chars() {
        if ch.is_uppercase() && !current.is_empty() {
            words.push(std::mem::take(&mut current));
        }
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    words
        .iter()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
