//! Activation functions.
//!
//! A relaxation step computes, for every neuron, the weighted sum of its incoming
//! activations and then applies an activation function element-wise to that sum.
//!
//! Both non-linear functions use the exact natural base `e`:
//!
//! - sigmoid: `1 / (1 + e^-x)`
//! - tanh: `(e^x - e^-x) / (e^x + e^-x)`

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
/// Element-wise activation function applied by a relaxation step.
pub enum Activation {
    /// Linear pass-through, the plain weighted sum.
    Identity,
    #[default]
    Sigmoid,
    Tanh,
}

impl Activation {
    /// Maps the boolean switch used by [`crate::LayeredNet::output`].
    #[inline]
    pub fn from_sigmoid_flag(use_sigmoid: bool) -> Self {
        if use_sigmoid {
            Activation::Sigmoid
        } else {
            Activation::Identity
        }
    }

    #[inline]
    pub fn apply(self, x: f32) -> f32 {
        match self {
            Activation::Identity => x,
            Activation::Sigmoid => sigmoid(x),
            // Same function as the exponential quotient, without the overflow to inf/inf.
            Activation::Tanh => x.tanh(),
        }
    }

    /// Applies the function to every entry of `values` in place.
    #[inline]
    pub fn apply_all(self, values: &mut [f32]) {
        if self == Activation::Identity {
            return;
        }
        for v in values {
            *v = self.apply(*v);
        }
    }
}

#[inline]
pub fn sigmoid(x: f32) -> f32 {
    // Numerically stable sigmoid.
    if x >= 0.0 {
        let z = (-x).exp();
        1.0 / (1.0 + z)
    } else {
        let z = x.exp();
        z / (1.0 + z)
    }
}
