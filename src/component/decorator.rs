//! Locates the component decorator and its metadata fields in TypeScript source
//!
//! Only the question "what does the recognized decorator's metadata object
//! say" is answered here; nothing else about the syntax tree is interpreted.

use super::descriptor::ComponentReference;
use tree_sitter::{Node, Parser, Tree};

pub const COMPONENT_DECORATOR: &str = "Component";
pub const COMPONENT_MODULE: &str = "@angular/core";
pub const TEMPLATE_URL_FIELD: &str = "templateUrl";
pub const STYLE_URLS_FIELD: &str = "styleUrls";

/// Raw metadata fields; a field is `None` when the metadata object lacks it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComponentMetadata {
    pub template_url: Option<ComponentReference>,
    pub style_urls: Option<Vec<ComponentReference>>,
}

impl ComponentMetadata {
    pub fn is_empty(&self) -> bool {
        self.template_url.is_none() && self.style_urls.is_none()
    }
}

/// Local names under which the decorator is reachable
#[derive(Debug, Clone, PartialEq, Eq)]
enum Binding {
    /// `import { Component }` or `import { Component as C }`
    Named(String),
    /// `import * as ng` used as `ng.Component`
    Namespace(String),
}

fn txt<'s>(node: Node<'_>, src: &'s [u8]) -> &'s str {
    node.utf8_text(src).unwrap_or("")
}

fn named_children<'t>(node: Node<'t>) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor).collect()
}

/// Value of a string literal, or of a template literal without substitutions
fn literal_value(node: Node<'_>, src: &[u8]) -> Option<String> {
    let raw = txt(node, src);
    match node.kind() {
        "string" => Some(trim_delimiters(raw, &['\'', '"'])),
        "template_string" => {
            let has_substitution = named_children(node)
                .iter()
                .any(|c| c.kind() == "template_substitution");
            (!has_substitution).then(|| trim_delimiters(raw, &['`']))
        }
        _ => None,
    }
}

fn trim_delimiters(raw: &str, delimiters: &[char]) -> String {
    let mut chars = raw.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last)) if first == last && delimiters.contains(&first) => {
            chars.as_str().to_string()
        }
        _ => raw.to_string(),
    }
}

pub fn parse_source(content: &str) -> Option<Tree> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into())
        .ok()?;
    parser.parse(content, None)
}

fn import_bindings(root: Node<'_>, src: &[u8], name: &str, module: &str) -> Vec<Binding> {
    let mut bindings = Vec::new();

    for statement in named_children(root) {
        if statement.kind() != "import_statement" {
            continue;
        }
        let from_module = statement
            .child_by_field_name("source")
            .and_then(|s| literal_value(s, src))
            .is_some_and(|s| s == module);
        if !from_module {
            continue;
        }

        for clause in named_children(statement) {
            if clause.kind() != "import_clause" {
                continue;
            }
            for part in named_children(clause) {
                match part.kind() {
                    "named_imports" => {
                        for specifier in named_children(part) {
                            if specifier.kind() != "import_specifier" {
                                continue;
                            }
                            let Some(imported) = specifier.child_by_field_name("name") else {
                                continue;
                            };
                            if txt(imported, src) != name {
                                continue;
                            }
                            let local = specifier.child_by_field_name("alias").unwrap_or(imported);
                            bindings.push(Binding::Named(txt(local, src).to_string()));
                        }
                    }
                    "namespace_import" => {
                        if let Some(ident) = named_children(part)
                            .into_iter()
                            .find(|n| n.kind() == "identifier")
                        {
                            bindings.push(Binding::Namespace(txt(ident, src).to_string()));
                        }
                    }
                    _ => {}
                }
            }
        }
    }

    bindings
}

fn callee_matches(callee: Node<'_>, src: &[u8], name: &str, bindings: &[Binding]) -> bool {
    match callee.kind() {
        "identifier" => {
            let ident = txt(callee, src);
            bindings
                .iter()
                .any(|b| matches!(b, Binding::Named(local) if local == ident))
        }
        "member_expression" => {
            let object = callee.child_by_field_name("object");
            let property = callee.child_by_field_name("property");
            match (object, property) {
                (Some(object), Some(property)) if object.kind() == "identifier" => {
                    let namespace = txt(object, src);
                    txt(property, src) == name
                        && bindings
                            .iter()
                            .any(|b| matches!(b, Binding::Namespace(ns) if ns == namespace))
                }
                _ => false,
            }
        }
        _ => false,
    }
}

/// Nodes below `root` in document order
fn descendants(root: Node<'_>) -> Vec<Node<'_>> {
    let mut out = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        out.push(node);
        let children = named_children(node);
        stack.extend(children.into_iter().rev());
    }
    out
}

/// Metadata object of the first decorator `name` imported from `module`.
///
/// Returns `None` when the decorator is not imported, not used, or its first
/// argument is not an object literal.
pub fn decorator_metadata<'t>(
    root: Node<'t>,
    src: &[u8],
    name: &str,
    module: &str,
) -> Option<Node<'t>> {
    let bindings = import_bindings(root, src, name, module);
    if bindings.is_empty() {
        return None;
    }

    descendants(root)
        .into_iter()
        .filter(|node| node.kind() == "decorator")
        .find_map(|decorator| {
            let call = named_children(decorator)
                .into_iter()
                .find(|n| n.kind() == "call_expression")?;
            let callee = call.child_by_field_name("function")?;
            if !callee_matches(callee, src, name, &bindings) {
                return None;
            }
            let arguments = call.child_by_field_name("arguments")?;
            named_children(arguments)
                .into_iter()
                .find(|n| n.kind() != "comment")
                .filter(|first| first.kind() == "object")
        })
}

/// Value node of the first `field: value` pair in an object literal
pub fn metadata_field<'t>(object: Node<'t>, src: &[u8], field: &str) -> Option<Node<'t>> {
    named_children(object)
        .into_iter()
        .filter(|n| n.kind() == "pair")
        .find(|pair| {
            pair.child_by_field_name("key")
                .map(|key| match key.kind() {
                    "property_identifier" => txt(key, src) == field,
                    "string" => literal_value(key, src).as_deref() == Some(field),
                    _ => false,
                })
                .unwrap_or(false)
        })
        .and_then(|pair| pair.child_by_field_name("value"))
}

fn reference(node: Node<'_>, src: &[u8]) -> Option<ComponentReference> {
    literal_value(node, src).map(|text| ComponentReference::at(text, node.start_byte()))
}

/// Reads `templateUrl` and `styleUrls` from the component decorator.
///
/// `None` means the source has no recognized component declaration. A
/// `templateUrl` that is not a string literal, or a `styleUrls` that is not an
/// array literal, counts as absent; non-literal array elements are ignored.
pub fn component_metadata(content: &str) -> Option<ComponentMetadata> {
    let tree = parse_source(content)?;
    let src = content.as_bytes();
    let metadata = decorator_metadata(tree.root_node(), src, COMPONENT_DECORATOR, COMPONENT_MODULE)?;

    let template_url = metadata_field(metadata, src, TEMPLATE_URL_FIELD)
        .and_then(|value| reference(value, src));

    let style_urls = metadata_field(metadata, src, STYLE_URLS_FIELD)
        .filter(|value| value.kind() == "array")
        .map(|array| {
            named_children(array)
                .into_iter()
                .filter_map(|element| reference(element, src))
                .collect()
        });

    Some(ComponentMetadata {
        template_url,
        style_urls,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const COMPONENT: &str = r#"import { Component, OnInit } from '@angular/core';

@Component({
  selector: 'app-a',
  templateUrl: '../../themes/_active/a/a.component.html',
  styleUrls: ['../../themes/_active/shared.scss', "./local.scss"]
})
export class AComponent implements OnInit {
  ngOnInit(): void {}
}
"#;

    #[test]
    fn test_component_metadata() {
        let metadata = component_metadata(COMPONENT).unwrap();

        let template = metadata.template_url.unwrap();
        assert_eq!(template.text, "../../themes/_active/a/a.component.html");
        let position = template.position.unwrap();
        assert_eq!(
            &COMPONENT[position..position + template.text.len() + 2],
            "'../../themes/_active/a/a.component.html'"
        );

        let styles = metadata.style_urls.unwrap();
        let texts: Vec<&str> = styles.iter().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["../../themes/_active/shared.scss", "./local.scss"]);
    }

    #[test]
    fn test_no_decorator() {
        let source = "import { Injectable } from '@angular/core';\nexport class Service {}\n";
        assert!(component_metadata(source).is_none());
    }

    #[test]
    fn test_other_decorator_is_ignored() {
        let source = r#"import { Injectable } from '@angular/core';

@Injectable({ providedIn: 'root' })
export class Service {}
"#;
        assert!(component_metadata(source).is_none());
    }

    #[test]
    fn test_component_from_other_module_is_ignored() {
        let source = r#"import { Component } from './my-decorators';

@Component({ templateUrl: '../themes/_active/x.html' })
export class X {}
"#;
        assert!(component_metadata(source).is_none());
    }

    #[test]
    fn test_aliased_import() {
        let source = r#"import { Component as NgComponent } from '@angular/core';

@NgComponent({ templateUrl: '../themes/_active/x.html' })
export class X {}
"#;
        let metadata = component_metadata(source).unwrap();
        assert_eq!(
            metadata.template_url.unwrap().text,
            "../themes/_active/x.html"
        );
        assert!(metadata.style_urls.is_none());
    }

    #[test]
    fn test_namespace_import() {
        let source = r#"import * as ng from '@angular/core';

@ng.Component({ styleUrls: ['../themes/_active/x.scss'] })
export class X {}
"#;
        let metadata = component_metadata(source).unwrap();
        assert!(metadata.template_url.is_none());
        assert_eq!(metadata.style_urls.unwrap().len(), 1);
    }

    #[test]
    fn test_inline_component_has_empty_metadata() {
        let source = r#"import { Component } from '@angular/core';

@Component({ selector: 'app-x', template: '<p>x</p>', styles: ['p {}'] })
export class X {}
"#;
        let metadata = component_metadata(source).unwrap();
        assert!(metadata.is_empty());
    }

    #[test]
    fn test_non_object_argument() {
        let source = r#"import { Component } from '@angular/core';

const META = { templateUrl: './x.html' };
@Component(META)
export class X {}
"#;
        assert!(component_metadata(source).is_none());
    }

    #[test]
    fn test_template_literal_and_non_literal_elements() {
        let source = r#"import { Component } from '@angular/core';

const extra = './extra.scss';
@Component({
  templateUrl: `../themes/_active/x.html`,
  styleUrls: [extra, '../themes/_active/x.scss'],
})
export class X {}
"#;
        let metadata = component_metadata(source).unwrap();
        assert_eq!(
            metadata.template_url.unwrap().text,
            "../themes/_active/x.html"
        );
        let styles = metadata.style_urls.unwrap();
        assert_eq!(styles.len(), 1);
        assert_eq!(styles[0].text, "../themes/_active/x.scss");
    }

    #[test]
    fn test_quoted_keys() {
        let source = r#"import { Component } from '@angular/core';

@Component({ 'templateUrl': './x.html', "styleUrls": [] })
export class X {}
"#;
        let metadata = component_metadata(source).unwrap();
        assert_eq!(metadata.template_url.unwrap().text, "./x.html");
        assert_eq!(metadata.style_urls.unwrap().len(), 0);
    }

    #[test]
    fn test_trim_delimiters() {
        assert_eq!(trim_delimiters("'a'", &['\'', '"']), "a");
        assert_eq!(trim_delimiters("\"a\"", &['\'', '"']), "a");
        assert_eq!(trim_delimiters("''", &['\'', '"']), "");
        assert_eq!(trim_delimiters("`a`", &['`']), "a");
    }
}
