//! Procedural macros for the `aoc-framework` crate.

use proc_macro::TokenStream;
use proc_macro2::Span;
use quote::quote;
use syn::meta::ParseNestedMeta;
use syn::parse::Parse;
use syn::{Error, Expr, Item, ItemImpl, ItemStruct, Type, parse_macro_input};

/// Properties given to `#[solution_runner(...)]`.
#[derive(Default)]
struct RunnerProperties {
    /// Expression resolving to the solution's display name.
    name: Option<Expr>,
    /// Type implementing `ParseData`, if the parts take parsed input.
    parsed: Option<Type>,
    /// Type implementing `Solution<PartOne>`.
    part_one: Option<Type>,
    /// Type implementing `Solution<PartTwo>`.
    part_two: Option<Type>,
    /// Expression resolving to a `TestCaseSet`.
    tests: Option<Expr>,
}

/// Parse a property value into `slot`, rejecting a second occurrence.
fn set_once<T: Parse>(
    slot: &mut Option<T>,
    meta: &ParseNestedMeta<'_>,
    key: &str,
) -> syn::Result<()> {
    if slot.is_some() {
        return Err(meta.error(format!("duplicate '{key}' property")));
    }
    *slot = Some(meta.value()?.parse()?);
    Ok(())
}

impl RunnerProperties {
    fn parse(&mut self, meta: &ParseNestedMeta<'_>) -> syn::Result<()> {
        let Some(key) = meta.path.get_ident().map(ToString::to_string) else {
            return Err(meta.error("unsupported solution runner property"));
        };
        match key.as_str() {
            "name" => set_once(&mut self.name, meta, &key),
            "parsed" => set_once(&mut self.parsed, meta, &key),
            "part_one" => set_once(&mut self.part_one, meta, &key),
            "part_two" => set_once(&mut self.part_two, meta, &key),
            "tests" => set_once(&mut self.tests, meta, &key),
            _ => Err(meta.error("unsupported solution runner property")),
        }
    }
}

fn missing_property(key: &str) -> TokenStream {
    Error::new(Span::call_site(), format!("missing required property: '{key}'"))
        .to_compile_error()
        .into()
}

/// Procedural macro attribute that generates a `SolutionRunner` implementation.
///
/// The generated `run` hands the request to `aoc_framework::runner::run_solution`, choosing the
/// `Unparsed`, `Parsed` or `Unsolved` adapter for each part.
///
/// # Properties
///
/// - `name` (required): An expression that evaluates to `&str`, the solution's display name.
/// - `part_one` (required): The type implementing `Solution<PartOne>`.
/// - `part_two` (optional): The type implementing `Solution<PartTwo>`. If omitted, running part
///   two is an error.
/// - `parsed` (optional): A type implementing `ParseData`, parsed from the input before solving
///   either part. If omitted, the input string is passed directly to the solutions.
/// - `tests` (optional): An expression evaluating to a `TestCaseSet` of example fixtures. If
///   omitted, test runs have no cases.
///
/// # Errors
///
/// Returns a compile error if:
/// - Applied to anything other than a struct or impl block
/// - Required properties (`name`, `part_one`) are missing
/// - Any property is specified more than once
/// - An unsupported property is provided
///
/// # Examples
///
/// ```ignore
/// #[solution_runner(
///     name = "Day 1: Report Repair",
///     parsed = Expenses,
///     part_one = Day01,
///     part_two = Day01,
///     tests = test_cases()
/// )]
/// impl super::AdventOfCode<2020, 1> {}
/// ```
#[proc_macro_attribute]
pub fn solution_runner(args: TokenStream, input: TokenStream) -> TokenStream {
    let mut properties = RunnerProperties::default();
    let properties_parser = syn::meta::parser(|meta| properties.parse(&meta));
    parse_macro_input!(args with properties_parser);

    let Some(name_expr) = properties.name else {
        return missing_property("name");
    };
    let Some(part_one_ty) = properties.part_one else {
        return missing_property("part_one");
    };

    let adapt = |solution_ty: &Type| match &properties.parsed {
        Some(parsed_ty) => quote! { aoc_framework::runner::Parsed<#parsed_ty, #solution_ty> },
        None => quote! { aoc_framework::runner::Unparsed<#solution_ty> },
    };
    let part_one_adapter = adapt(&part_one_ty);
    let part_two_adapter = properties
        .part_two
        .as_ref()
        .map_or_else(|| quote! { aoc_framework::runner::Unsolved }, adapt);
    let tests_expr = properties.tests.map_or_else(
        || quote! { aoc_framework::runner::TestCaseSet::default() },
        |expr| quote! { #expr },
    );

    let original_input = input.clone(); // clone before macro consumes input
    let item = parse_macro_input!(input as Item);

    let self_ty = match item {
        Item::Struct(ItemStruct { ident, .. }) => quote! { #ident },
        Item::Impl(ItemImpl { self_ty, .. }) => quote! { #self_ty },
        _ => {
            return Error::new(
                Span::call_site(),
                "the #[solution_runner] macro can only be applied to a struct or an impl block",
            )
            .to_compile_error()
            .into();
        }
    };

    let input_ts = proc_macro2::TokenStream::from(original_input);
    TokenStream::from(quote! {
        #input_ts

        impl aoc_framework::runner::SolutionRunner for #self_ty {
            fn run(
                request: &aoc_framework::runner::RunRequest,
                handler: &mut dyn aoc_framework::runner::OutputHandler,
            ) -> aoc_framework::DynamicResult<aoc_framework::runner::RunOutcome> {
                aoc_framework::runner::run_solution::<#part_one_adapter, #part_two_adapter>(
                    #name_expr,
                    request,
                    &#tests_expr,
                    handler,
                )
            }
        }
    })
}
