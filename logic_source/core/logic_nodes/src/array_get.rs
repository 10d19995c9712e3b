use logic_context::{NodeContext, NodeError, Result};
use logic_variant::Variant;

use crate::node::{LogicNode, SocketDef};

static INPUTS: [SocketDef; 2] = [SocketDef::value("Array"), SocketDef::value("Index")];
static OUTPUTS: [SocketDef; 1] = [SocketDef::value("Value")];

/// Reads one element of an array. Negative indices count back from the end.
#[derive(Debug, Default, Clone, Copy)]
pub struct ArrayGetNode;

impl ArrayGetNode {
    pub const TYPE_NAME: &'static str = "ArrayGetNode";

    pub const ARRAY: usize = 0;
    pub const INDEX: usize = 1;

    pub fn new() -> Self {
        Self
    }
}

/// Maps `index` onto `0..len`, `-1` being the last element.
/// Returns `None` when the normalized index still falls outside the array.
pub fn resolve_index(index: i64, len: usize) -> Option<usize> {
    let len = i64::try_from(len).ok()?;
    let normalized = if index < 0 { len + index } else { index };
    if (0..len).contains(&normalized) {
        Some(normalized as usize)
    } else {
        None
    }
}

impl LogicNode for ArrayGetNode {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn inputs(&self) -> &'static [SocketDef] {
        &INPUTS
    }

    fn outputs(&self) -> &'static [SocketDef] {
        &OUTPUTS
    }

    fn get(&self, ctx: &mut dyn NodeContext, output: usize) -> Result<Variant> {
        if output != 0 {
            return Err(NodeError::NoSuchOutput { output });
        }

        let array = ctx.input(Self::ARRAY)?;
        let items = array
            .expect_array()
            .map_err(|e| NodeError::type_mismatch(Self::ARRAY, e))?;
        let index = ctx
            .input(Self::INDEX)?
            .expect_int()
            .map_err(|e| NodeError::type_mismatch(Self::INDEX, e))?;

        let Some(resolved) = resolve_index(index, items.len()) else {
            return Err(NodeError::IndexOutOfRange {
                index,
                len: items.len(),
            });
        };
        log::trace!("ArrayGetNode: [{index}] -> element {resolved} of {}", items.len());
        Ok(items[resolved].clone())
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::testing::MockContext;

    fn ints(values: &[i64]) -> Variant {
        Variant::Array(values.iter().copied().map(Variant::from).collect())
    }

    fn eval(values: &[i64], index: i64) -> Result<Variant> {
        let mut ctx = MockContext::new(vec![ints(values), Variant::from(index)]);
        ArrayGetNode::new().get(&mut ctx, 0)
    }

    #[test]
    fn first_and_last() {
        assert_eq!(eval(&[10, 20, 30], 0), Ok(Variant::from(10i64)));
        assert_eq!(eval(&[10, 20, 30], -1), Ok(Variant::from(30i64)));
        assert_eq!(eval(&[10, 20, 30], -3), Ok(Variant::from(10i64)));
    }

    #[test]
    fn out_of_range_after_normalization() {
        assert_eq!(
            eval(&[10, 20, 30], -4),
            Err(NodeError::IndexOutOfRange { index: -4, len: 3 })
        );
        assert_eq!(
            eval(&[10, 20, 30], 3),
            Err(NodeError::IndexOutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            eval(&[], 0),
            Err(NodeError::IndexOutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn returns_element_as_is() {
        let nested = Variant::from(vec![Variant::string("a"), Variant::Null]);
        let mut ctx = MockContext::new(vec![
            Variant::from(vec![Variant::Bool(true), nested.clone()]),
            Variant::from(-1),
        ]);
        assert_eq!(ArrayGetNode.get(&mut ctx, 0), Ok(nested));
    }

    #[test]
    fn rejects_non_array_input() {
        let mut ctx = MockContext::new(vec![Variant::from(5), Variant::from(0)]);
        let err = ArrayGetNode.get(&mut ctx, 0).unwrap_err();
        assert!(matches!(err, NodeError::TypeMismatch { slot: 0, .. }));
    }

    #[test]
    fn rejects_float_index() {
        let mut ctx = MockContext::new(vec![ints(&[1, 2]), Variant::from(1.0f64)]);
        let err = ArrayGetNode.get(&mut ctx, 0).unwrap_err();
        assert!(matches!(err, NodeError::TypeMismatch { slot: 1, .. }));
    }

    #[test]
    fn unknown_output() {
        let mut ctx = MockContext::new(vec![ints(&[1]), Variant::from(0)]);
        assert_eq!(
            ArrayGetNode.get(&mut ctx, 1),
            Err(NodeError::NoSuchOutput { output: 1 })
        );
        assert!(ctx.reads.is_empty());
    }

    #[test]
    fn not_runnable() {
        let mut ctx = MockContext::new(Vec::new());
        assert!(matches!(
            ArrayGetNode.run(&mut ctx),
            Err(NodeError::NotAnActionNode { .. })
        ));
    }

    #[test]
    fn resolve_index_bounds() {
        assert_eq!(resolve_index(-1, 1), Some(0));
        assert_eq!(resolve_index(-2, 1), None);
        assert_eq!(resolve_index(i64::MIN, 4), None);
        assert_eq!(resolve_index(i64::MAX, 4), None);
    }

    fn array_and_index() -> impl Strategy<Value = (Vec<i64>, usize)> {
        (1usize..32).prop_flat_map(|len| (prop::collection::vec(any::<i64>(), len), 0..len))
    }

    proptest! {
        #[test]
        fn non_negative_index_reads_that_element((values, i) in array_and_index()) {
            prop_assert_eq!(eval(&values, i as i64), Ok(Variant::from(values[i])));
        }

        #[test]
        fn negative_index_counts_from_end((values, i) in array_and_index()) {
            let negative = -((i as i64) + 1);
            let expected = values[values.len() - 1 - i];
            prop_assert_eq!(eval(&values, negative), Ok(Variant::from(expected)));
        }
    }
}
