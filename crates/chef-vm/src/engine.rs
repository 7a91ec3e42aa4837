//! The execution engine: owns the mutable cooking state and implements
//! every Chef operator, the loop-control program counter (spec §4.5), and
//! sous-chef invocation (spec §4.4 `Serve with`).

use chef_ast::{Cell, CellType, Ingredient, LoopFrame, Stack};
use chef_parser::{Program, ParsedRecipe};
use indexmap::IndexMap;

use crate::config::ExecutionConfig;
use crate::dispatch_table::{self, Verb};
use crate::error::ChefError;

/// Per-recipe-invocation mutable state (spec §3 "Cooking state").
#[derive(Debug, Clone, Default)]
pub struct CookingState {
    pub ingredients: IndexMap<String, Ingredient>,
    pub bowls: Vec<Stack>,
    pub dishes: Vec<Stack>,
    pub diners: Vec<String>,
    pub loop_stack: Vec<LoopFrame>,
    pub pc: usize,
    pub exit: bool,
}

/// One running recipe invocation. The main recipe and every sous-chef it
/// calls each get their own `Engine`, all borrowing the same immutable
/// `Program` (spec §5: "the only shared resource is the statement list;
/// it is immutable after lexing").
pub struct Engine<'p> {
    program: &'p Program,
    recipe: &'p ParsedRecipe,
    config: &'p ExecutionConfig,
    depth: usize,
    pub state: CookingState,
}

impl<'p> Engine<'p> {
    pub fn new(program: &'p Program, recipe: &'p ParsedRecipe, config: &'p ExecutionConfig) -> Self {
        Self::new_nested(program, recipe, config, 0, Vec::new(), Vec::new())
    }

    fn new_nested(
        program: &'p Program,
        recipe: &'p ParsedRecipe,
        config: &'p ExecutionConfig,
        depth: usize,
        bowls: Vec<Stack>,
        dishes: Vec<Stack>,
    ) -> Self {
        Self {
            program,
            recipe,
            config,
            depth,
            state: CookingState {
                ingredients: recipe.ingredients.clone(),
                bowls,
                dishes,
                diners: Vec::new(),
                loop_stack: Vec::new(),
                pc: recipe.method_start,
                exit: false,
            },
        }
    }

    pub fn into_diners(self) -> Vec<String> {
        self.state.diners
    }

    /// Run from the current program counter to the end of this recipe's
    /// method body, then perform `Serves N` unless execution already
    /// exited via `Refrigerate` (spec §4.5, §4.4 "Serves").
    pub fn run(&mut self) -> Result<(), ChefError> {
        self.state.pc = self.recipe.method_start;

        while !self.state.exit && self.state.pc < self.recipe.method_end {
            if self.step_loop_control()? {
                continue;
            }
            self.dispatch(self.state.pc)?;
            self.state.pc += 1;
        }

        if !self.state.exit {
            self.prepare_dishes(self.recipe.serves_n, self.recipe.serves_pc)?;
        }
        Ok(())
    }

    /// Consults the loop stack at the head of an iteration. Returns
    /// `true` if it redirected `pc` and the caller should re-check the
    /// loop before dispatching (spec §4.5).
    fn step_loop_control(&mut self) -> Result<bool, ChefError> {
        let Some(frame) = self.state.loop_stack.last() else {
            return Ok(false);
        };
        let force_exit = frame.force_exit;
        let end_pc = frame.end_pc;
        let start_pc = frame.start_pc;
        let guard = frame.guard.clone();
        let decrement = frame.decrement.clone();

        if force_exit {
            self.state.pc = end_pc + 1;
            self.state.loop_stack.pop();
            return Ok(true);
        }

        if self.state.pc != end_pc {
            return Ok(false);
        }

        // The back edge decrements first, then checks: mirrors real Chef,
        // where the closing statement always consumes one unit of the
        // decrement-target before deciding whether to loop again. Checking
        // before decrementing would run the body once too many times for a
        // guard that starts positive.
        if let Some(name) = &decrement {
            self.decrement_ingredient(name, end_pc)?;
        } else {
            // `until` named no ingredient (bare `Bake until cooked.`): the
            // decrement target defaults to the guard itself.
            self.decrement_ingredient(&guard, end_pc)?;
        }
        let guard_value = self.ingredient_value(&guard, end_pc)?;
        if guard_value <= 0 {
            self.state.pc = end_pc + 1;
            self.state.loop_stack.pop();
        } else {
            self.state.pc = start_pc + 1;
        }
        Ok(true)
    }

    fn dispatch(&mut self, pc: usize) -> Result<(), ChefError> {
        let statement = self.program.statements[pc].clone();
        let tokens = chef_parser::tokenize(&statement);
        let Some(&first) = tokens.first() else {
            return Ok(());
        };
        let second = tokens.get(1).copied();

        match dispatch_table::classify(first, second) {
            Verb::Put => self.op_put(&tokens, pc),
            Verb::Fold => self.op_fold(&tokens, pc),
            Verb::Add => self.op_add(&tokens, pc),
            Verb::Remove => self.op_remove(&tokens, pc),
            Verb::Combine => self.op_combine(&tokens, pc),
            Verb::Divide => self.op_divide(&tokens, pc),
            Verb::Liquefy => self.op_liquefy(&tokens),
            Verb::Stir => self.op_stir(&tokens, pc),
            Verb::Clean => self.op_clean(&tokens),
            Verb::Pour => self.op_pour(&tokens, pc),
            Verb::SetAside => {
                self.op_set_aside();
                Ok(())
            }
            Verb::ServeWith => self.op_serve_with(&tokens, pc),
            Verb::Refrigerate => self.op_refrigerate(&tokens, pc),
            Verb::Take => Err(ChefError::Unsupported {
                verb: "Take".to_string(),
                statement_index: pc + 1,
            }),
            Verb::Mix => Err(ChefError::Unsupported {
                verb: "Mix".to_string(),
                statement_index: pc + 1,
            }),
            Verb::LoopHeader => self.op_loop_header(&tokens, pc),
        }
    }

    // --- operators (spec §4.4) -------------------------------------------------

    fn op_put(&mut self, tokens: &[&str], pc: usize) -> Result<(), ChefError> {
        let name = chef_parser::extract_ingredient_name(tokens, 1, Some("into"));
        let index = self.require_bowl(tokens, pc)?;
        let cell = self.ingredient_cell(&name, pc)?;
        self.bowl_mut(index).push(cell);
        Ok(())
    }

    fn op_fold(&mut self, tokens: &[&str], pc: usize) -> Result<(), ChefError> {
        let name = chef_parser::extract_ingredient_name(tokens, 1, Some("into"));
        let index = self.require_bowl(tokens, pc)?;
        let cell = self
            .bowl_mut(index)
            .pop()
            .ok_or(ChefError::EmptyMixingBowl { index, statement_index: pc + 1 })?;
        let ingredient = self
            .state
            .ingredients
            .get_mut(&name)
            .ok_or_else(|| ChefError::UndefinedIngredient { name: name.clone(), statement_index: pc + 1 })?;
        ingredient.value = Some(cell.value);
        ingredient.kind = cell.kind;
        Ok(())
    }

    fn op_add(&mut self, tokens: &[&str], pc: usize) -> Result<(), ChefError> {
        let name = chef_parser::extract_ingredient_name(tokens, 1, Some("to"));
        let index = chef_parser::extract_mixing_bowl_index(tokens).or_default_first();

        if name == "dry ingredients" {
            let sum = self
                .state
                .ingredients
                .values()
                .filter(|i| i.kind == CellType::Dry)
                .map(|i| i.value.unwrap_or(0))
                .fold(0i64, i64::wrapping_add);
            self.bowl_mut(index).push(Cell::new(sum, CellType::Unspecified));
            return Ok(());
        }

        let cell = self.ingredient_cell(&name, pc)?;
        let top = self
            .bowl_mut(index)
            .top_mut()
            .ok_or(ChefError::EmptyMixingBowl { index, statement_index: pc + 1 })?;
        top.value = top.value.wrapping_add(cell.value);
        Ok(())
    }

    fn op_remove(&mut self, tokens: &[&str], pc: usize) -> Result<(), ChefError> {
        let name = chef_parser::extract_ingredient_name(tokens, 1, Some("from"));
        let index = chef_parser::extract_mixing_bowl_index(tokens).or_default_first();
        let cell = self.ingredient_cell(&name, pc)?;
        let top = self
            .bowl_mut(index)
            .top_mut()
            .ok_or(ChefError::EmptyMixingBowl { index, statement_index: pc + 1 })?;
        top.value = top.value.wrapping_sub(cell.value);
        Ok(())
    }

    fn op_combine(&mut self, tokens: &[&str], pc: usize) -> Result<(), ChefError> {
        let name = chef_parser::extract_ingredient_name(tokens, 1, Some("into"));
        let index = chef_parser::extract_mixing_bowl_index(tokens).or_default_first();
        let cell = self.ingredient_cell(&name, pc)?;
        let top = self
            .bowl_mut(index)
            .top_mut()
            .ok_or(ChefError::EmptyMixingBowl { index, statement_index: pc + 1 })?;
        top.value = top.value.wrapping_mul(cell.value);
        Ok(())
    }

    fn op_divide(&mut self, tokens: &[&str], pc: usize) -> Result<(), ChefError> {
        let name = chef_parser::extract_ingredient_name(tokens, 1, Some("into"));
        let index = chef_parser::extract_mixing_bowl_index(tokens).or_default_first();
        let cell = self.ingredient_cell(&name, pc)?;
        if cell.value == 0 {
            return Err(ChefError::DivisionByZero { statement_index: pc + 1 });
        }
        let top = self
            .bowl_mut(index)
            .top_mut()
            .ok_or(ChefError::EmptyMixingBowl { index, statement_index: pc + 1 })?;
        // Rust's integer division already truncates toward zero.
        top.value /= cell.value;
        Ok(())
    }

    fn op_liquefy(&mut self, tokens: &[&str]) -> Result<(), ChefError> {
        let index = chef_parser::extract_mixing_bowl_index(tokens).or_default_first();
        self.bowl_mut(index).liquefy();
        Ok(())
    }

    fn op_stir(&mut self, tokens: &[&str], pc: usize) -> Result<(), ChefError> {
        let index = chef_parser::extract_mixing_bowl_index(tokens).or_default_first();
        if let Some(minutes_pos) = tokens.iter().position(|&t| t == "minutes") {
            let n: i64 = minutes_pos
                .checked_sub(1)
                .and_then(|i| tokens.get(i))
                .and_then(|t| t.parse().ok())
                .unwrap_or(0);
            self.bowl_mut(index).roll_top_down(n);
        } else {
            let name = chef_parser::extract_ingredient_name(tokens, 1, Some("into"));
            let cell = self.ingredient_cell(&name, pc)?;
            self.bowl_mut(index).roll_top_down(cell.value);
        }
        Ok(())
    }

    fn op_clean(&mut self, tokens: &[&str]) -> Result<(), ChefError> {
        let index = chef_parser::extract_mixing_bowl_index(tokens).or_default_first();
        self.bowl_mut(index).clear();
        Ok(())
    }

    fn op_pour(&mut self, tokens: &[&str], pc: usize) -> Result<(), ChefError> {
        let bowl_index = self.require_bowl(tokens, pc)?;
        let dish_index = chef_parser::extract_baking_dish_index(tokens)
            .require()
            .ok_or(ChefError::MissingBakingDishAnchor { statement_index: pc + 1 })?;
        let cells = match self.state.bowls.get(bowl_index - 1) {
            Some(bowl) if !bowl.is_empty() => bowl.0.clone(),
            _ => return Err(ChefError::EmptyMixingBowl { index: bowl_index, statement_index: pc + 1 }),
        };
        self.dish_mut(dish_index).0.extend(cells);
        Ok(())
    }

    fn op_set_aside(&mut self) {
        if let Some(frame) = self.state.loop_stack.last_mut() {
            frame.force_exit = true;
        }
    }

    fn op_serve_with(&mut self, tokens: &[&str], pc: usize) -> Result<(), ChefError> {
        let title = chef_parser::extract_ingredient_name(tokens, 2, None);
        let program = self.program;
        let recipe = program
            .find(&title)
            .ok_or_else(|| ChefError::UnknownSousChef { title: title.clone(), statement_index: pc + 1 })?;

        if self.depth + 1 > self.config.max_sous_chef_depth {
            return Err(ChefError::RecursionLimit {
                limit: self.config.max_sous_chef_depth,
                statement_index: pc + 1,
            });
        }

        tracing::debug!(title = %recipe.title, depth = self.depth + 1, "invoking sous-chef");
        let mut sous = Engine::new_nested(
            program,
            recipe,
            self.config,
            self.depth + 1,
            self.state.bowls.clone(),
            self.state.dishes.clone(),
        );
        sous.run()?;

        if let Some(sous_bowl_one) = sous.state.bowls.first().cloned() {
            self.bowl_mut(1).0.extend(sous_bowl_one.0);
        }
        Ok(())
    }

    fn op_refrigerate(&mut self, tokens: &[&str], pc: usize) -> Result<(), ChefError> {
        if tokens.len() > 1 {
            let hours: usize = tokens.get(2).and_then(|t| t.parse().ok()).unwrap_or(0);
            self.prepare_dishes(hours, pc)?;
        }
        self.state.exit = true;
        Ok(())
    }

    fn op_loop_header(&mut self, tokens: &[&str], pc: usize) -> Result<(), ChefError> {
        let guard = chef_parser::extract_ingredient_name(tokens, 1, None);
        let end_pc = self.find_until(pc)?;
        let until_tokens = chef_parser::tokenize(&self.program.statements[end_pc]);
        let decrement_name = chef_parser::extract_ingredient_name(&until_tokens, 1, Some("until"));
        let decrement = (!decrement_name.is_empty()).then_some(decrement_name);

        self.state.loop_stack.push(LoopFrame {
            start_pc: pc,
            end_pc,
            guard,
            decrement,
            force_exit: false,
        });
        Ok(())
    }

    fn find_until(&self, pc: usize) -> Result<usize, ChefError> {
        for idx in (pc + 1)..self.recipe.method_end {
            if chef_parser::tokenize(&self.program.statements[idx]).contains(&"until") {
                return Ok(idx);
            }
        }
        Err(ChefError::NoMatchingUntil { statement_index: pc + 1 })
    }

    fn prepare_dishes(&mut self, n: usize, pc: usize) -> Result<(), ChefError> {
        if n > self.state.dishes.len() {
            return Err(ChefError::NotEnoughDishes {
                requested: n,
                available: self.state.dishes.len(),
                statement_index: pc + 1,
            });
        }
        for dish in &mut self.state.dishes[..n] {
            let mut rendered = String::new();
            while let Some(cell) = dish.pop() {
                match cell.kind {
                    CellType::Liquid => {
                        let ch = char::from_u32(cell.value as u32).unwrap_or(char::REPLACEMENT_CHARACTER);
                        rendered.push(ch);
                    }
                    CellType::Dry | CellType::Unspecified => {
                        rendered.push_str(&cell.value.to_string());
                    }
                }
            }
            self.state.diners.push(rendered);
        }
        Ok(())
    }

    // --- shared lookups ----------------------------------------------------

    fn require_bowl(&self, tokens: &[&str], pc: usize) -> Result<usize, ChefError> {
        chef_parser::extract_mixing_bowl_index(tokens)
            .require()
            .ok_or(ChefError::MissingMixingBowlAnchor { statement_index: pc + 1 })
    }

    fn bowl_mut(&mut self, index: usize) -> &mut Stack {
        if self.state.bowls.len() < index {
            self.state.bowls.resize_with(index, Stack::new);
        }
        &mut self.state.bowls[index - 1]
    }

    fn dish_mut(&mut self, index: usize) -> &mut Stack {
        if self.state.dishes.len() < index {
            self.state.dishes.resize_with(index, Stack::new);
        }
        &mut self.state.dishes[index - 1]
    }

    fn ingredient_cell(&self, name: &str, pc: usize) -> Result<Cell, ChefError> {
        let ingredient = self
            .state
            .ingredients
            .get(name)
            .ok_or_else(|| ChefError::UndefinedIngredient { name: name.to_string(), statement_index: pc + 1 })?;
        let value = ingredient
            .value
            .ok_or_else(|| ChefError::UndefinedIngredientValue { name: name.to_string(), statement_index: pc + 1 })?;
        Ok(Cell::new(value, ingredient.kind))
    }

    fn ingredient_value(&self, name: &str, pc: usize) -> Result<i64, ChefError> {
        self.ingredient_cell(name, pc).map(|cell| cell.value)
    }

    fn decrement_ingredient(&mut self, name: &str, pc: usize) -> Result<(), ChefError> {
        let ingredient = self
            .state
            .ingredients
            .get_mut(name)
            .ok_or_else(|| ChefError::UndefinedIngredient { name: name.to_string(), statement_index: pc + 1 })?;
        let value = ingredient
            .value
            .ok_or_else(|| ChefError::UndefinedIngredientValue { name: name.to_string(), statement_index: pc + 1 })?;
        ingredient.value = Some(value - 1);
        Ok(())
    }
}
