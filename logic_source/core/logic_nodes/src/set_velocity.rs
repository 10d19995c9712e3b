use logic_context::{NodeContext, NodeError, PHYSICS_BODY_NAME, PhysicsModule, Result};
use logic_ids::ObjectID;
use logic_variant::Vector3;

use crate::node::{LogicNode, SocketDef};
use crate::support::PhysicsSupport;

static INPUTS: [SocketDef; 6] = [
    SocketDef::action("In"),
    SocketDef::value("Object"),
    SocketDef::value("Linear"),
    SocketDef::value("Linear Factor"),
    SocketDef::value("Angular"),
    SocketDef::value("Angular Factor"),
];
static OUTPUTS: [SocketDef; 1] = [SocketDef::action("Out")];

/// Overwrites a rigid body's linear and angular velocity (and their per-axis
/// factors), then continues the chain.
#[derive(Debug, Clone, Copy)]
pub struct SetVelocityNode {
    physics: PhysicsSupport,
}

/// Velocity command read from the node inputs.
#[derive(Debug, Clone, Copy, PartialEq)]
struct VelocityCommand {
    linear: Vector3,
    linear_factor: Vector3,
    angular: Vector3,
    angular_factor: Vector3,
}

impl SetVelocityNode {
    pub const TYPE_NAME: &'static str = "SetVelocityNode";

    pub const OBJECT: usize = 1;
    pub const LINEAR: usize = 2;
    pub const LINEAR_FACTOR: usize = 3;
    pub const ANGULAR: usize = 4;
    pub const ANGULAR_FACTOR: usize = 5;

    pub const OUT: usize = 0;

    pub fn new(physics: PhysicsSupport) -> Self {
        Self { physics }
    }

    fn target(ctx: &mut dyn NodeContext) -> Result<ObjectID> {
        let object = ctx
            .input(Self::OBJECT)?
            .expect_object()
            .map_err(|e| NodeError::type_mismatch(Self::OBJECT, e))?;
        Ok(object.unwrap_or_else(|| ctx.owner()))
    }

    fn vector(ctx: &mut dyn NodeContext, slot: usize) -> Result<Vector3> {
        ctx.input(slot)?
            .expect_vec4()
            .map(|v| v.xyz())
            .map_err(|e| NodeError::type_mismatch(slot, e))
    }

    fn command(ctx: &mut dyn NodeContext) -> Result<VelocityCommand> {
        Ok(VelocityCommand {
            linear: Self::vector(ctx, Self::LINEAR)?,
            linear_factor: Self::vector(ctx, Self::LINEAR_FACTOR)?,
            angular: Self::vector(ctx, Self::ANGULAR)?,
            angular_factor: Self::vector(ctx, Self::ANGULAR_FACTOR)?,
        })
    }

    fn dispatch(ctx: &mut dyn NodeContext, object: ObjectID, command: VelocityCommand) -> Result<()> {
        let mut physics = PhysicsModule::new(ctx);
        let Some(body) = physics.body_mut(object) else {
            return Err(NodeError::MissingCapability {
                object,
                capability: PHYSICS_BODY_NAME,
            });
        };

        log::debug!("SetVelocityNode: {object} <- {command:?}");
        // activate precedes every velocity write
        body.activate();
        let VelocityCommand {
            linear: l,
            linear_factor: lf,
            angular: a,
            angular_factor: af,
        } = command;
        body.set_linear_velocity(l.x, l.y, l.z);
        body.set_linear_factor(lf.x, lf.y, lf.z);
        body.set_angular_velocity(a.x, a.y, a.z);
        body.set_angular_factor(af.x, af.y, af.z);
        Ok(())
    }
}

impl Default for SetVelocityNode {
    fn default() -> Self {
        Self::new(PhysicsSupport::default())
    }
}

impl LogicNode for SetVelocityNode {
    fn type_name(&self) -> &'static str {
        Self::TYPE_NAME
    }

    fn inputs(&self) -> &'static [SocketDef] {
        &INPUTS
    }

    fn outputs(&self) -> &'static [SocketDef] {
        &OUTPUTS
    }

    fn run(&self, ctx: &mut dyn NodeContext) -> Result<()> {
        // inputs are read even with physics off
        let object = Self::target(ctx)?;
        let command = Self::command(ctx)?;
        if self.physics.is_enabled() {
            Self::dispatch(ctx, object, command)?;
        } else {
            log::trace!("SetVelocityNode: physics disabled, forwarding only");
        }
        ctx.run_output(Self::OUT);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use logic_variant::{Variant, Vector4};

    use super::*;
    #[cfg(feature = "physics")]
    use crate::testing::BodyCall;
    use crate::testing::MockContext;

    fn inputs(object: Variant) -> Vec<Variant> {
        vec![
            Variant::Null,
            object,
            Variant::from(Vector4::new(1.0, 2.0, 3.0, 0.0)),
            Variant::from(Vector4::new(1.0, 0.0, 1.0, 0.0)),
            Variant::from(Vector4::new(-0.5, 0.25, 4.0, 7.0)),
            Variant::from(Vector4::new(0.0, 0.0, 1.0, 1.0)),
        ]
    }

    #[cfg(feature = "physics")]
    fn expected_calls() -> Vec<BodyCall> {
        vec![
            BodyCall::Activate,
            BodyCall::LinearVelocity([1.0, 2.0, 3.0]),
            BodyCall::LinearFactor([1.0, 0.0, 1.0]),
            BodyCall::AngularVelocity([-0.5, 0.25, 4.0]),
            BodyCall::AngularFactor([0.0, 0.0, 1.0]),
        ]
    }

    #[cfg(feature = "physics")]
    #[test]
    fn applies_command_to_target_after_activate() {
        let target = ObjectID::new(7);
        let mut ctx = MockContext::new(inputs(Variant::from(target))).with_body(target);

        SetVelocityNode::new(PhysicsSupport::Enabled)
            .run(&mut ctx)
            .unwrap();

        assert_eq!(ctx.calls(target), expected_calls().as_slice());
        assert_eq!(ctx.continued, vec![SetVelocityNode::OUT]);
    }

    #[cfg(feature = "physics")]
    #[test]
    fn activate_happens_once_and_first() {
        let target = ObjectID::new(7);
        let mut ctx = MockContext::new(inputs(Variant::from(target))).with_body(target);

        SetVelocityNode::new(PhysicsSupport::Enabled)
            .run(&mut ctx)
            .unwrap();

        let calls = ctx.calls(target);
        let activations = calls.iter().filter(|c| **c == BodyCall::Activate).count();
        assert_eq!(activations, 1);
        assert_eq!(calls.first(), Some(&BodyCall::Activate));
    }

    #[cfg(feature = "physics")]
    #[test]
    fn null_object_falls_back_to_owner() {
        let mut ctx = MockContext::new(inputs(Variant::Null));
        let owner = ctx.owner;
        ctx = ctx.with_body(owner);

        SetVelocityNode::new(PhysicsSupport::Enabled)
            .run(&mut ctx)
            .unwrap();

        assert_eq!(ctx.calls(owner), expected_calls().as_slice());
    }

    #[cfg(feature = "physics")]
    #[test]
    fn missing_body_aborts_without_continuing() {
        let target = ObjectID::new(9);
        let mut ctx = MockContext::new(inputs(Variant::from(target)));

        let err = SetVelocityNode::new(PhysicsSupport::Enabled)
            .run(&mut ctx)
            .unwrap_err();

        assert_eq!(
            err,
            NodeError::MissingCapability {
                object: target,
                capability: PHYSICS_BODY_NAME,
            }
        );
        assert!(ctx.continued.is_empty());
    }

    #[test]
    fn disabled_physics_only_continues() {
        let target = ObjectID::new(7);
        let mut ctx = MockContext::new(inputs(Variant::from(target))).with_body(target);

        SetVelocityNode::new(PhysicsSupport::Disabled)
            .run(&mut ctx)
            .unwrap();

        assert!(ctx.calls(target).is_empty());
        assert_eq!(ctx.reads, vec![1, 2, 3, 4, 5]);
        assert_eq!(ctx.continued, vec![SetVelocityNode::OUT]);
    }

    #[cfg(not(feature = "physics"))]
    #[test]
    fn build_without_physics_never_dispatches() {
        let target = ObjectID::new(7);
        let mut ctx = MockContext::new(inputs(Variant::from(target))).with_body(target);

        SetVelocityNode::new(PhysicsSupport::Enabled)
            .run(&mut ctx)
            .unwrap();

        assert!(ctx.calls(target).is_empty());
        assert_eq!(ctx.continued, vec![SetVelocityNode::OUT]);
    }

    #[test]
    fn disabled_physics_still_reports_bad_input() {
        let target = ObjectID::new(7);
        let mut values = inputs(Variant::from(target));
        values[SetVelocityNode::LINEAR] = Variant::from("fast");
        let mut ctx = MockContext::new(values).with_body(target);

        let err = SetVelocityNode::new(PhysicsSupport::Disabled)
            .run(&mut ctx)
            .unwrap_err();

        assert!(matches!(
            err,
            NodeError::TypeMismatch {
                slot: SetVelocityNode::LINEAR,
                ..
            }
        ));
        assert!(ctx.calls(target).is_empty());
        assert!(ctx.continued.is_empty());
    }

    #[cfg(feature = "physics")]
    #[test]
    fn vector3_inputs_are_accepted() {
        let target = ObjectID::new(2);
        let mut values = inputs(Variant::from(target));
        values[SetVelocityNode::LINEAR] = Variant::from(Vector3::new(1.0, 2.0, 3.0));
        let mut ctx = MockContext::new(values).with_body(target);

        SetVelocityNode::new(PhysicsSupport::Enabled)
            .run(&mut ctx)
            .unwrap();

        assert_eq!(ctx.calls(target)[1], BodyCall::LinearVelocity([1.0, 2.0, 3.0]));
    }

    #[test]
    fn bad_vector_input_reports_slot() {
        let target = ObjectID::new(2);
        let mut values = inputs(Variant::from(target));
        values[SetVelocityNode::ANGULAR_FACTOR] = Variant::from(1);
        let mut ctx = MockContext::new(values).with_body(target);

        let err = SetVelocityNode::new(PhysicsSupport::Enabled)
            .run(&mut ctx)
            .unwrap_err();

        assert!(matches!(
            err,
            NodeError::TypeMismatch {
                slot: SetVelocityNode::ANGULAR_FACTOR,
                ..
            }
        ));
        assert!(ctx.calls(target).is_empty());
        assert!(ctx.continued.is_empty());
    }

    #[test]
    fn not_a_value_node() {
        let mut ctx = MockContext::new(Vec::new());
        assert!(matches!(
            SetVelocityNode::default().get(&mut ctx, 0),
            Err(NodeError::NotAValueNode { .. })
        ));
    }
}
